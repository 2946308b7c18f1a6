
/// Marker radius for a magnitude-0 star, in pixels
pub const MARKER_BASE_RADIUS: f64 = 6.0;

/// Smallest marker radius, so faint stars stay visible
pub const MIN_MARKER_RADIUS: f64 = 1.0;

/// Stars brighter than this magnitude get a halo
pub const HALO_MAGNITUDE: f64 = 2.0;

/// Extra halo radius beyond the marker, in pixels
pub const HALO_EXTRA_RADIUS: f64 = 1.0;

/// Hit slop added to the marker radius, in pixels
pub const HIT_SLOP: f64 = 3.0;

/// Tooltip offset from the pointer, in pixels
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// Default drawing surface width
pub const DEFAULT_SURFACE_WIDTH: u32 = 800;

/// Default drawing surface height
pub const DEFAULT_SURFACE_HEIGHT: u32 = 600;

/// Constellation placeholder that the tooltip hides
pub const UNKNOWN_CONSTELLATION: &str = "Unknown";
