//! CPU renderer for the star field

use folio_core::constants::HALO_EXTRA_RADIUS;
use folio_core::{project_all, ProjectedPoint, StarRecord, Surface};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::style::RenderStyle;

/// Draws a star set onto a fixed-size RGBA surface
pub struct StarFieldRenderer {
    surface: Surface,
    style: RenderStyle,
}

impl StarFieldRenderer {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            style: RenderStyle::default(),
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Render stars to a fresh image
    pub fn render(&self, stars: &[StarRecord]) -> RgbaImage {
        let mut image = RgbaImage::new(self.surface.width, self.surface.height);
        self.render_into(&mut image, stars);
        image
    }

    /// Redraw `image` from scratch with the given stars
    pub fn render_into(&self, image: &mut RgbaImage, stars: &[StarRecord]) {
        let [r, g, b] = self.style.background;
        for pixel in image.pixels_mut() {
            *pixel = Rgba([r, g, b, 255]);
        }

        let points = project_all(stars, self.surface);

        for (star, point) in stars.iter().zip(points) {
            let radius = star.radius();
            fill_circle(image, point, radius, self.style.marker, 1.0);

            if star.has_halo() {
                fill_circle(
                    image,
                    point,
                    radius + HALO_EXTRA_RADIUS,
                    self.style.halo,
                    self.style.halo_alpha,
                );
            }
        }
    }

    /// Render and write a PNG
    pub fn save_png(&self, stars: &[StarRecord], path: &Path) -> image::ImageResult<()> {
        let image = self.render(stars);
        image.save_with_format(path, image::ImageFormat::Png)?;
        tracing::info!("Wrote {}x{} star map to {:?}", image.width(), image.height(), path);
        Ok(())
    }
}

/// Blend a filled disc over `image`. A pixel is covered when its center lies
/// inside the circle.
fn fill_circle(image: &mut RgbaImage, center: ProjectedPoint, radius: f64, color: [u8; 3], alpha: f32) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let x0 = (center.x - radius).floor().max(0.0) as u32;
    let y0 = (center.y - radius).floor().max(0.0) as u32;
    let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(width - 1);
    let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(height - 1);

    let r_sq = radius * radius;
    let alpha = alpha.clamp(0.0, 1.0);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - center.x;
            let dy = y as f64 + 0.5 - center.y;
            if dx * dx + dy * dy > r_sq {
                continue;
            }

            let existing = image.get_pixel(x, y);
            let blend = |c: usize| {
                (existing[c] as f32 * (1.0 - alpha) + color[c] as f32 * alpha).round() as u8
            };
            let blended = Rgba([blend(0), blend(1), blend(2), 255]);
            image.put_pixel(x, y, blended);
        }
    }
}
