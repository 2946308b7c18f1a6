//! Star map widget state (platform-agnostic)

use folio_core::{
    hit_test, HitPolicy, ProjectedPoint, SkyBounds, StarRecord, Surface, Tooltip,
};
use folio_data::sample_in_order;
use folio_render::StarFieldRenderer;
use image::RgbaImage;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarMapConfig {
    pub surface: Surface,
    /// Number of stars shown at once; `None` shows the whole catalog
    pub sample_size: Option<usize>,
    pub hit_policy: HitPolicy,
}

impl Default for StarMapConfig {
    fn default() -> Self {
        Self {
            surface: Surface::default(),
            sample_size: None,
            hit_policy: HitPolicy::FirstMatch,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Hover {
    index: usize,
    pointer: ProjectedPoint,
}

/// Loaded catalog, displayed subset and pointer hover
pub struct StarMap {
    config: StarMapConfig,
    catalog: Vec<StarRecord>,
    active: Vec<StarRecord>,
    hover: Option<Hover>,
    /// Bumped whenever the active set changes; a changed revision means redraw
    revision: u64,
}

impl StarMap {
    pub fn new(config: StarMapConfig) -> Self {
        Self {
            config,
            catalog: Vec::new(),
            active: Vec::new(),
            hover: None,
            revision: 0,
        }
    }

    pub fn config(&self) -> &StarMapConfig {
        &self.config
    }

    pub fn surface(&self) -> Surface {
        self.config.surface
    }

    pub fn catalog(&self) -> &[StarRecord] {
        &self.catalog
    }

    /// Stars currently displayed, in stored order
    pub fn active(&self) -> &[StarRecord] {
        &self.active
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Install a freshly loaded catalog and pick the first displayed set
    pub fn set_catalog<R: Rng + ?Sized>(&mut self, stars: Vec<StarRecord>, rng: &mut R) {
        self.catalog = stars;
        self.resample(rng);
    }

    /// Pick a new random subset of the catalog. Returns the displayed count.
    pub fn resample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.active = match self.config.sample_size {
            Some(n) => sample_in_order(&self.catalog, n, rng),
            None => self.catalog.clone(),
        };
        self.hover = None;
        self.revision += 1;
        tracing::debug!("Displaying {} of {} stars", self.active.len(), self.catalog.len());
        self.active.len()
    }

    pub fn bounds(&self) -> Option<SkyBounds> {
        SkyBounds::from_stars(&self.active)
    }

    /// Hit-test the pointer and remember the result for the tooltip
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<&StarRecord> {
        let pointer = ProjectedPoint::new(x, y);
        self.hover = hit_test(&self.active, self.config.surface, pointer, self.config.hit_policy)
            .map(|index| Hover { index, pointer });
        self.hovered()
    }

    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    pub fn hovered(&self) -> Option<&StarRecord> {
        self.hover.and_then(|h| self.active.get(h.index))
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let hover = self.hover?;
        let star = self.active.get(hover.index)?;
        Some(Tooltip::for_star(star, hover.pointer.x, hover.pointer.y))
    }

    pub fn status_line(&self) -> String {
        format!("Stars loaded: {}", self.active.len())
    }

    pub fn renderer(&self) -> StarFieldRenderer {
        StarFieldRenderer::new(self.config.surface)
    }

    /// Full redraw of the active set
    pub fn draw(&self, renderer: &StarFieldRenderer) -> RgbaImage {
        renderer.render(&self.active)
    }
}

impl Default for StarMap {
    fn default() -> Self {
        Self::new(StarMapConfig::default())
    }
}
