mod common;

use clusterviz::prelude::*;
use common::*;

const TOLERANCE: f32 = 0.001;

fn close(a: VizPoint2d<f32>, b: VizPoint2d<f32>) -> bool {
    a.distance(&b) < TOLERANCE
}

fn earthquake_badge(magnitudes: &[f64]) -> DonutBadge {
    let scheme = CategoryScheme::earthquake_magnitude();
    let counts = scheme.accumulate(magnitudes.iter().copied());
    synthesize(&counts, &scheme.palette(), &BadgeParams::default()).unwrap()
}

#[test]
fn test_badge_from_magnitudes() {
    init();
    let badge = earthquake_badge(&[1.0, 2.5, 2.9, 4.1, 6.0]);

    assert_eq!(badge.total, 5);
    assert_eq!(badge.tier, SizeTier::Small);
    assert_eq!(badge.size, VizDimensions::new(36, 36));
    assert_eq!(badge.label.text, "5");

    // mag3 is empty and gets no wedge
    let categories: Vec<usize> = badge.segments.iter().map(|s| s.category).collect();
    assert_eq!(categories, vec![0, 1, 3, 4]);
    assert!(badge.segment(2).is_none());

    let mag2 = badge.segment(1).unwrap();
    assert_eq!(mag2.count, 2);
    assert!((mag2.start - 0.2).abs() < 1e-12);
    assert!((mag2.end - 0.6).abs() < 1e-12);
    assert_eq!(mag2.color, VizColor::from_hex("#feb24c").unwrap());
    assert!((badge.span_sum() - 1.0).abs() < 1e-12);
}

#[test]
fn test_single_category_ring_stays_open() {
    init();
    let badge = earthquake_badge(&[5.5, 6.1, 7.0]);
    let params = BadgeParams::default();

    assert_eq!(badge.len(), 1);
    let segment = &badge.segments[0];
    assert_eq!(segment.category, 4);
    assert_eq!(segment.start, 0.0);
    assert_eq!(segment.end, 1.0 - params.full_circle_epsilon);
    assert!(segment.wedge.large_arc);

    // The end point must not coincide exactly with the start, or a vector arc would collapse
    let wedge = segment.wedge;
    let gap = wedge.outer_start().distance(&wedge.outer_end());
    assert!(gap > 0.0 && gap < 0.01);
}

#[test]
fn test_wedge_geometry() {
    init();
    let badge = synthesize(
        &[1, 1, 2],
        &VizColor::palette_from_hex(&["#ff0000", "#00ff00", "#0000ff"]).unwrap(),
        &BadgeParams::default(),
    )
    .unwrap();

    assert_eq!(badge.outer_radius, 18.0);
    assert_eq!(badge.inner_radius, 11.0);
    let center = VizPoint2d::new(18.0, 18.0);
    assert_eq!(badge.background, VizCircle::new(center, 11.0));

    // The first wedge starts at 12 o'clock and runs a quarter turn clockwise to 3 o'clock
    let first = badge.segments[0].wedge;
    assert!(close(first.outer_start(), VizPoint2d::new(18.0, 0.0)));
    assert!(close(first.inner_start(), VizPoint2d::new(18.0, 7.0)));
    assert!(close(first.outer_end(), VizPoint2d::new(36.0, 18.0)));
    assert!(close(first.inner_end(), VizPoint2d::new(29.0, 18.0)));
    assert!(!first.large_arc);

    // The last wedge covers exactly half the ring, which is not a large arc
    let last = badge.segments[2].wedge;
    assert!((last.sweep() - std::f64::consts::PI).abs() < 1e-9);
    assert!(!last.large_arc);
    assert!(close(last.outer_end(), first.outer_start()));

    // Neighbouring wedges share their boundary points
    for pair in badge.segments.windows(2) {
        assert!(close(pair[0].wedge.outer_end(), pair[1].wedge.outer_start()));
        assert!(close(pair[0].wedge.inner_end(), pair[1].wedge.inner_start()));
    }
}

#[test]
fn test_wedge_arcs_follow_the_outline() {
    init();
    let badge = earthquake_badge(&[1.0, 1.0, 1.0, 4.5]);
    for segment in &badge.segments {
        let wedge = segment.wedge;

        let outer = wedge.outer_arcs();
        assert!(close(outer[0].start, wedge.outer_start()));
        assert!(close(outer[outer.len() - 1].end, wedge.outer_end()));

        let inner = wedge.inner_arcs();
        assert!(close(inner[0].start, wedge.inner_end()));
        assert!(close(inner[inner.len() - 1].end, wedge.inner_start()));

        for pair in outer.windows(2).chain(inner.windows(2)) {
            assert!(close(pair[0].end, pair[1].start));
        }
        // Each cubic piece stays within a quarter turn
        assert!(outer.len() as f64 >= wedge.sweep() / std::f64::consts::FRAC_PI_2 - 1e-9);
    }
}

#[test]
fn test_paint_order() {
    init();
    let badge = earthquake_badge(&[1.0, 2.0, 3.0]);
    let shapes: Vec<(VizShape, VizColor)> = badge.iter_shapes().collect();

    assert_eq!(shapes.len(), badge.len() + 1);
    for (shape, segment) in shapes.iter().zip(&badge.segments) {
        assert_eq!(*shape, (VizShape::Wedge(segment.wedge), segment.color));
    }
    assert_eq!(
        shapes[shapes.len() - 1],
        (VizShape::Circle(badge.background), VizColor::WHITE)
    );
}

#[test]
fn test_tiers_through_reconciler() {
    init();
    let mut r = earthquake_reconciler();
    let mut surface = RecordingSurface::default();

    let features = vec![
        cluster(1, &[9, 0, 0, 0, 0]),
        cluster(2, &[10, 0, 0, 0, 0]),
        cluster(3, &[50, 49, 0, 0, 0]),
        cluster(4, &[0, 0, 100, 0, 0]),
        cluster(5, &[999, 0, 0, 0, 0]),
        cluster(6, &[600, 400, 0, 0, 0]),
    ];
    r.reconcile(&features, &mut surface).unwrap();

    let sizes: Vec<u32> = (1..=6)
        .map(|id| r.registry().get(ClusterId(id)).unwrap().size().x)
        .collect();
    assert_eq!(sizes, vec![36, 48, 48, 64, 64, 100]);

    let huge = r.registry().get(ClusterId(6)).unwrap().element();
    assert_eq!(huge.label.text, "1,000");
    assert_eq!(huge.label.font_size, 22);
    assert_eq!(huge.inner_radius, 30.0);
}
