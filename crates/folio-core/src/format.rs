//! Fixed-point number text for display

/// Round to `decimals` places, halves away from zero (`1.25` -> `1.3`)
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// `value` with exactly `decimals` places, halves rounded away from zero.
///
/// `format!("{:.1}", 1.25)` rounds the tie to even and prints `1.2`; display
/// text here always reads `1.3`.
pub fn format_fixed(value: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, round_half_away(value, decimals))
}
