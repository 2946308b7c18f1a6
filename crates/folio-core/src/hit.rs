//! Pointer hit-testing against projected markers

use serde::{Deserialize, Serialize};

use crate::projection::{project_all, ProjectedPoint, Surface};
use crate::star::StarRecord;

/// How to choose among overlapping markers under the pointer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HitPolicy {
    /// First qualifying star in stored order
    #[default]
    FirstMatch,
    /// Qualifying star closest to the pointer; ties go to the earlier star
    Nearest,
}

/// Index of the star under `pointer`, if any.
///
/// A star qualifies when the pointer is strictly closer than its marker
/// radius plus the hit slop. Bounds and projections are recomputed from
/// `stars` on every call; this is a linear scan.
pub fn hit_test(
    stars: &[StarRecord],
    surface: Surface,
    pointer: ProjectedPoint,
    policy: HitPolicy,
) -> Option<usize> {
    let points = project_all(stars, surface);

    let mut qualifying = stars
        .iter()
        .zip(points)
        .enumerate()
        .filter_map(|(i, (star, point))| {
            let dist = point.distance_to(pointer);
            (dist < star.hit_radius()).then_some((i, dist))
        });

    match policy {
        HitPolicy::FirstMatch => qualifying.next().map(|(i, _)| i),
        HitPolicy::Nearest => qualifying
            .fold(None, |best: Option<(usize, f64)>, (i, dist)| match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((i, dist)),
            })
            .map(|(i, _)| i),
    }
}
