//! RA/Dec to surface pixel projection
//!
//! A plain linear mapping of the bounding box onto the drawing surface.
//! RA grows to the right, Dec grows upward (pixel y is inverted).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::bounds::SkyBounds;
use crate::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::star::StarRecord;

/// Drawing surface extent in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: ProjectedPoint) -> bool {
        point.x >= 0.0
            && point.x <= self.width as f64
            && point.y >= 0.0
            && point.y <= self.height as f64
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
    }
}

/// Position of a star on the surface, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: ProjectedPoint) -> f64 {
        DVec2::from(*self).distance(DVec2::from(other))
    }
}

impl From<ProjectedPoint> for DVec2 {
    fn from(p: ProjectedPoint) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for ProjectedPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Normalized position in [0, 1] x [0, 1] for stars inside `bounds`
pub fn normalize(star: &StarRecord, bounds: &SkyBounds) -> DVec2 {
    let x = (star.ra - bounds.ra_min) / bounds.ra_span();
    let y = 1.0 - (star.dec - bounds.dec_min) / bounds.dec_span();
    DVec2::new(x, y)
}

/// Project a star onto the surface
pub fn project(star: &StarRecord, bounds: &SkyBounds, surface: Surface) -> ProjectedPoint {
    let extent = DVec2::new(surface.width as f64, surface.height as f64);
    (normalize(star, bounds) * extent).into()
}

/// Project every star against bounds computed from the same set
pub fn project_all(stars: &[StarRecord], surface: Surface) -> Vec<ProjectedPoint> {
    match SkyBounds::from_stars(stars) {
        Some(bounds) => stars.iter().map(|s| project(s, &bounds, surface)).collect(),
        None => Vec::new(),
    }
}
