use serde::{Deserialize, Serialize};

/// Colors used by the star field renderer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub background: [u8; 3],
    pub marker: [u8; 3],
    pub halo: [u8; 3],
    /// Halo opacity in [0, 1]
    pub halo_alpha: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            marker: [255, 255, 255],
            halo: [255, 255, 255],
            halo_alpha: 0.3,
        }
    }
}
