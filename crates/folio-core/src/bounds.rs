use serde::{Deserialize, Serialize};

use crate::star::StarRecord;

/// Axis-aligned bounding box over (RA, Dec) of a star set
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkyBounds {
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
}

impl SkyBounds {
    /// Componentwise min/max over the set. `None` for an empty set.
    pub fn from_stars(stars: &[StarRecord]) -> Option<Self> {
        let first = stars.first()?;

        let mut bounds = SkyBounds {
            ra_min: first.ra,
            ra_max: first.ra,
            dec_min: first.dec,
            dec_max: first.dec,
        };

        for star in &stars[1..] {
            bounds.ra_min = bounds.ra_min.min(star.ra);
            bounds.ra_max = bounds.ra_max.max(star.ra);
            bounds.dec_min = bounds.dec_min.min(star.dec);
            bounds.dec_max = bounds.dec_max.max(star.dec);
        }

        Some(bounds)
    }

    /// RA extent used as the projection divisor; 1 when the extent is zero
    pub fn ra_span(&self) -> f64 {
        non_zero_span(self.ra_max - self.ra_min)
    }

    /// Dec extent used as the projection divisor; 1 when the extent is zero
    pub fn dec_span(&self) -> f64 {
        non_zero_span(self.dec_max - self.dec_min)
    }
}

// A zero range normalizes every coordinate to 0 instead of dividing by zero.
fn non_zero_span(span: f64) -> f64 {
    if span == 0.0 {
        1.0
    } else {
        span
    }
}
