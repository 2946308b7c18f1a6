use crate::bounds::*;
use crate::format::*;
use crate::hit::*;
use crate::projection::*;
use crate::star::*;

fn sample_sky() -> Vec<StarRecord> {
    vec![
        StarRecord::new("Polaris", 2.53, 89.26, 1.98),
        StarRecord::new("Sirius", 6.75, -16.72, -1.46),
        StarRecord::new("Vega", 18.62, 38.78, 0.03),
        StarRecord::new("Rigel", 5.24, -8.2, 0.13),
        StarRecord::new("Faint", 23.1, -60.0, 6.5),
    ]
}

#[test]
fn test_bounds_componentwise() {
    let bounds = SkyBounds::from_stars(&sample_sky()).unwrap();
    assert_eq!(bounds.ra_min, 2.53);
    assert_eq!(bounds.ra_max, 23.1);
    assert_eq!(bounds.dec_min, -60.0);
    assert_eq!(bounds.dec_max, 89.26);
}

#[test]
fn test_empty_set_has_no_bounds() {
    assert!(SkyBounds::from_stars(&[]).is_none());
    assert!(project_all(&[], Surface::default()).is_empty());
}

#[test]
fn test_projection_inside_surface() {
    let stars = sample_sky();
    let surface = Surface::new(800, 600);

    for point in project_all(&stars, surface) {
        assert!(surface.contains(point), "{:?} outside surface", point);
    }
}

#[test]
fn test_projection_known_values() {
    let stars = vec![
        StarRecord::new("a", 0.0, 0.0, 3.0),
        StarRecord::new("b", 10.0, 40.0, 3.0),
        StarRecord::new("c", 5.0, 10.0, 3.0),
    ];
    let points = project_all(&stars, Surface::new(800, 600));

    // Lowest declination lands on the bottom edge.
    assert_eq!(points[0], ProjectedPoint::new(0.0, 600.0));
    assert_eq!(points[1], ProjectedPoint::new(800.0, 0.0));
    assert!((points[2].x - 400.0).abs() < 1e-9);
    assert!((points[2].y - 450.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_ra_normalizes_to_zero() {
    let stars = vec![
        StarRecord::new("a", 5.0, -10.0, 2.0),
        StarRecord::new("b", 5.0, 0.0, 2.0),
        StarRecord::new("c", 5.0, 30.0, 2.0),
    ];
    let points = project_all(&stars, Surface::new(800, 600));

    for point in &points {
        assert_eq!(point.x, 0.0);
        assert!(point.y.is_finite());
    }
}

#[test]
fn test_degenerate_dec_uses_unit_divisor() {
    let stars = vec![
        StarRecord::new("a", 1.0, 12.0, 2.0),
        StarRecord::new("b", 3.0, 12.0, 2.0),
    ];
    let bounds = SkyBounds::from_stars(&stars).unwrap();
    assert_eq!(bounds.dec_span(), 1.0);

    let points = project_all(&stars, Surface::new(800, 600));
    assert_eq!(points[0].y, 600.0);
    assert_eq!(points[1].y, 600.0);
    assert_eq!(points[1].x, 800.0);
}

#[test]
fn test_single_star_projects_to_origin_column() {
    let stars = vec![StarRecord::new("only", 7.0, 45.0, 1.0)];
    let points = project_all(&stars, Surface::new(800, 600));
    assert_eq!(points, vec![ProjectedPoint::new(0.0, 600.0)]);
}

#[test]
fn test_marker_radius_monotonic_with_floor() {
    assert_eq!(marker_radius(-1.0), 7.0);
    assert_eq!(marker_radius(1.0), 5.0);
    assert_eq!(marker_radius(5.0), 1.0);
    assert_eq!(marker_radius(7.5), 1.0);

    let mut previous = f64::INFINITY;
    for step in -20..=100 {
        let r = marker_radius(step as f64 * 0.1);
        assert!(r <= previous, "radius grew at mag {}", step as f64 * 0.1);
        assert!(r >= 1.0);
        previous = r;
    }
}

#[test]
fn test_halo_only_below_magnitude_two() {
    assert!(StarRecord::new("x", 0.0, 0.0, 1.99).has_halo());
    assert!(!StarRecord::new("x", 0.0, 0.0, 2.0).has_halo());
    assert!(!StarRecord::new("x", 0.0, 0.0, 4.0).has_halo());
}

fn overlapping_sky() -> Vec<StarRecord> {
    vec![
        StarRecord::new("anchor-low", 0.0, 0.0, 6.0),
        StarRecord::new("first", 5.0, 10.0, 4.0),
        StarRecord::new("second", 5.01, 10.0, 4.0),
        StarRecord::new("anchor-high", 10.0, 40.0, 6.0),
    ]
}

#[test]
fn test_hit_none_when_pointer_far() {
    let stars = overlapping_sky();
    let hit = hit_test(
        &stars,
        Surface::new(800, 600),
        ProjectedPoint::new(200.0, 100.0),
        HitPolicy::FirstMatch,
    );
    assert!(hit.is_none());
}

#[test]
fn test_hit_boundary_is_exclusive() {
    let stars = overlapping_sky();
    let surface = Surface::new(800, 600);

    // anchor-low sits at (0, 600) with radius 1, so the hit radius is 4.
    let on_edge = hit_test(&stars, surface, ProjectedPoint::new(4.0, 600.0), HitPolicy::FirstMatch);
    assert!(on_edge.is_none());

    let inside = hit_test(&stars, surface, ProjectedPoint::new(3.9, 600.0), HitPolicy::FirstMatch);
    assert_eq!(inside, Some(0));
}

#[test]
fn test_hit_first_match_wins_on_overlap() {
    let stars = overlapping_sky();
    // "first" projects to (400, 450), "second" to (400.8, 450).
    let pointer = ProjectedPoint::new(401.0, 450.0);

    let hit = hit_test(&stars, Surface::new(800, 600), pointer, HitPolicy::FirstMatch);
    assert_eq!(hit, Some(1));
    assert_eq!(stars[hit.unwrap()].name, "first");
}

#[test]
fn test_hit_nearest_policy_picks_closest() {
    let stars = overlapping_sky();
    let pointer = ProjectedPoint::new(401.0, 450.0);

    let hit = hit_test(&stars, Surface::new(800, 600), pointer, HitPolicy::Nearest);
    assert_eq!(hit, Some(2));
}

#[test]
fn test_hit_on_empty_set() {
    let hit = hit_test(&[], Surface::default(), ProjectedPoint::new(0.0, 0.0), HitPolicy::Nearest);
    assert!(hit.is_none());
}

#[test]
fn test_tooltip_lines() {
    let sirius = StarRecord::new("Sirius", 6.7525, -16.7161, -1.46).with_constellation("Canis Major");
    assert_eq!(
        sirius.tooltip_lines(),
        vec![
            "Sirius".to_string(),
            "Constellation: Canis Major".to_string(),
            "Magnitude: -1.5".to_string(),
            "RA: 6.75h, Dec: -16.7°".to_string(),
        ]
    );

    let tooltip = Tooltip::for_star(&sirius, 100.0, 50.0);
    assert_eq!((tooltip.x, tooltip.y), (110.0, 60.0));
    assert!(tooltip.text().starts_with("Sirius\nConstellation"));
}

#[test]
fn test_tooltip_hides_unknown_constellation() {
    let star = StarRecord::new("Nameless", 1.0, 2.0, 3.0).with_constellation("Unknown");
    let lines = star.tooltip_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| !l.starts_with("Constellation")));
}

#[test]
fn test_tooltip_rounds_ties_away_from_zero() {
    // Mimosa: every field is an exact binary tie at its display precision.
    let mimosa = StarRecord::new("Mimosa", 6.125, 38.25, 1.25);
    let lines = mimosa.tooltip_lines();
    assert_eq!(lines[1], "Magnitude: 1.3");
    assert_eq!(lines[2], "RA: 6.13h, Dec: 38.3°");

    let south = StarRecord::new("South", 0.125, -38.25, -0.25);
    let lines = south.tooltip_lines();
    assert_eq!(lines[1], "Magnitude: -0.3");
    assert_eq!(lines[2], "RA: 0.13h, Dec: -38.3°");
}

#[test]
fn test_format_fixed() {
    assert_eq!(format_fixed(1.25, 1), "1.3");
    assert_eq!(format_fixed(2.5, 0), "3");
    assert_eq!(format_fixed(0.03, 1), "0.0");
    assert_eq!(format_fixed(3.0, 2), "3.00");
    assert_eq!(round_half_away(64000.125, 2), 64000.13);
}
