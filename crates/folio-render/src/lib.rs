//! Star map rasterization.
//!
//! Full redraw on every call: clear to the background, then draw every
//! marker (and halo) in stored order.

pub mod style;
pub mod star_field;

pub use star_field::StarFieldRenderer;
pub use style::RenderStyle;
