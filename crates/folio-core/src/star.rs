//! Star records as loaded from the catalog

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::format::format_fixed;

/// A single catalog star
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    pub name: String,
    /// Right ascension in hours [0, 24)
    pub ra: f64,
    /// Declination in degrees [-90, 90]
    pub dec: f64,
    /// Apparent magnitude (lower is brighter)
    pub mag: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
}

impl StarRecord {
    pub fn new(name: impl Into<String>, ra: f64, dec: f64, mag: f64) -> Self {
        Self {
            name: name.into(),
            ra,
            dec,
            mag,
            constellation: None,
        }
    }

    pub fn with_constellation(mut self, constellation: impl Into<String>) -> Self {
        self.constellation = Some(constellation.into());
        self
    }

    /// Marker radius in pixels for this star
    pub fn radius(&self) -> f64 {
        marker_radius(self.mag)
    }

    /// Brighter stars (mag < 2) are drawn with a halo
    pub fn has_halo(&self) -> bool {
        self.mag < HALO_MAGNITUDE
    }

    /// Distance under which a pointer counts as hovering this star
    pub fn hit_radius(&self) -> f64 {
        self.radius() + HIT_SLOP
    }

    /// Constellation to display, hiding the catalog's "Unknown" placeholder
    pub fn display_constellation(&self) -> Option<&str> {
        self.constellation
            .as_deref()
            .filter(|c| !c.is_empty() && *c != UNKNOWN_CONSTELLATION)
    }

    /// Tooltip text lines, top to bottom
    pub fn tooltip_lines(&self) -> Vec<String> {
        let mut lines = vec![self.name.clone()];
        if let Some(constellation) = self.display_constellation() {
            lines.push(format!("Constellation: {constellation}"));
        }
        lines.push(format!("Magnitude: {}", format_fixed(self.mag, 1)));
        lines.push(format!(
            "RA: {}h, Dec: {}°",
            format_fixed(self.ra, 2),
            format_fixed(self.dec, 1)
        ));
        lines
    }
}

/// Marker radius for a magnitude: `max(1, 6 - mag)`
pub fn marker_radius(mag: f64) -> f64 {
    (MARKER_BASE_RADIUS - mag).max(MIN_MARKER_RADIUS)
}

/// Info box shown next to the pointer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
}

impl Tooltip {
    pub fn for_star(star: &StarRecord, pointer_x: f64, pointer_y: f64) -> Self {
        Self {
            x: pointer_x + TOOLTIP_OFFSET,
            y: pointer_y + TOOLTIP_OFFSET,
            lines: star.tooltip_lines(),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
