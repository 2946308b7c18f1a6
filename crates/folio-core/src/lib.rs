//! Geometry of the star map widget.
//!
//! Pure functions only: bounds over a star set, projection of RA/Dec into
//! surface pixels, marker sizing and pointer hit-testing. Nothing here
//! touches I/O, so the same code runs natively and in the browser.

pub mod bounds;
pub mod constants;
pub mod format;
pub mod hit;
pub mod projection;
pub mod star;

#[cfg(test)]
mod tests;

pub use bounds::SkyBounds;
pub use format::{format_fixed, round_half_away};
pub use hit::{hit_test, HitPolicy};
pub use projection::{project, project_all, ProjectedPoint, Surface};
pub use star::{marker_radius, StarRecord, Tooltip};
