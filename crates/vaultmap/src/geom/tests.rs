use super::*;
use nalgebra::vector;
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

#[test]
fn zero_items_is_empty_not_error() {
    let c = vector![0.0, 0.0];
    assert!(circle(0, c, 100.0, 0.0).is_empty());
    assert!(arc(0, c, 100.0, 0.0, PI).is_empty());
    assert!(arc_inclusive(0, c, 100.0, 0.0, PI).is_empty());
    let s = Spread::Circle {
        radius: 10.0,
        start_angle: 0.0,
    };
    assert!(s.place(0, c).is_empty());
}

#[test]
fn four_items_land_on_cardinal_points() {
    // Screen coordinates: angle π/2 is straight down.
    let pts = circle(4, vector![100.0, 100.0], 50.0, 0.0);
    assert_eq!(
        pts,
        vec![
            Px::new(150, 100),
            Px::new(100, 150),
            Px::new(50, 100),
            Px::new(100, 50),
        ]
    );
}

#[test]
fn single_item_on_arc_sits_at_midpoint() {
    let c = vector![-200.0, 400.0];
    let start = FRAC_PI_2 - PI / 3.0;
    let span = TAU / 3.0;
    let pts = arc(1, c, 400.0, start, span);
    let expected = Px::snap(polar(c, 400.0, start + span / 2.0));
    assert_eq!(pts, vec![expected]);
    // Midpoint of that arc is straight below the anchor.
    assert_eq!(pts[0], Px::new(-200, 800));

    let incl = arc_inclusive(1, c, 400.0, start, span);
    assert_eq!(incl, pts);
}

#[test]
fn arc_step_is_span_over_count() {
    let a = arc_angles(4, 0.5, 2.0);
    assert_eq!(a.len(), 4);
    for w in a.windows(2) {
        assert!((w[1] - w[0] - 0.5).abs() < 1e-12);
    }
    assert!((a[0] - 0.5).abs() < 1e-12);
}

#[test]
fn inclusive_arc_touches_both_endpoints() {
    let a = arc_inclusive_angles(5, PI / 4.0, 1.5 * PI);
    assert!((a[0] - PI / 4.0).abs() < 1e-12);
    assert!((a[4] - 1.75 * PI).abs() < 1e-12);
}

#[test]
fn spread_dispatch_matches_free_functions() {
    let c = vector![10.0, -20.0];
    let s = Spread::Arc {
        radius: 300.0,
        start_angle: 1.0,
        span: 2.0,
    };
    assert_eq!(s.place(3, c), arc(3, c, 300.0, 1.0, 2.0));
    assert_eq!(s.radius(), 300.0);
}

#[test]
fn spread_json_uses_kind_tag() {
    let s: Spread = serde_json::from_str(r#"{"kind":"circle","radius":250}"#).unwrap();
    assert_eq!(
        s,
        Spread::Circle {
            radius: 250.0,
            start_angle: 0.0
        }
    );
    let arc: Spread =
        serde_json::from_str(r#"{"kind":"arc_inclusive","radius":1,"start_angle":0,"span":3}"#)
            .unwrap();
    assert!(matches!(arc, Spread::ArcInclusive { .. }));
}

#[test]
fn sides_follow_dominant_direction() {
    let center = Px::new(-200, -100);
    assert_eq!(
        side_towards(center, Px::new(-700, -100)),
        (Side::Left, Side::Right)
    );
    assert_eq!(
        side_towards(center, Px::new(500, -100)),
        (Side::Right, Side::Left)
    );
    assert_eq!(
        side_towards(center, Px::new(-200, 400)),
        (Side::Bottom, Side::Top)
    );
    assert_eq!(
        side_towards(center, Px::new(-200, -600)),
        (Side::Top, Side::Bottom)
    );
}

#[test]
fn size_centres_box_on_point() {
    let s = Size::new(240, 120);
    assert_eq!(s.centered_on(Px::new(0, 0)), Px::new(-120, -60));
}

proptest! {
    #[test]
    fn circle_points_lie_on_radius(
        n in 1usize..64,
        cx in -2000.0f64..2000.0,
        cy in -2000.0f64..2000.0,
        r in 0.0f64..1500.0,
        start in -TAU..TAU,
    ) {
        let c = vector![cx, cy];
        let pts = circle(n, c, r, start);
        prop_assert_eq!(pts.len(), n);
        for p in pts {
            let d = (p.to_vec() - c).norm();
            prop_assert!((d - r).abs() <= 1.0, "distance {} vs radius {}", d, r);
        }
    }

    #[test]
    fn circle_angles_are_evenly_spaced(n in 1usize..128, start in -TAU..TAU) {
        let a = circle_angles(n, start);
        prop_assert_eq!(a.len(), n);
        let step = TAU / n as f64;
        for w in a.windows(2) {
            prop_assert!((w[1] - w[0] - step).abs() < 1e-9);
        }
    }

    #[test]
    fn snapped_circle_angles_track_exact_angles(n in 1usize..24, start in -PI..PI) {
        // With a large radius the rounding error in angle stays tiny.
        let r = 10_000.0;
        let pts = circle(n, vector![0.0, 0.0], r, start);
        for (p, th) in pts.iter().zip(circle_angles(n, start)) {
            let got = (p.y as f64).atan2(p.x as f64);
            let diff = (got - th).rem_euclid(TAU);
            let diff = diff.min(TAU - diff);
            prop_assert!(diff < 1e-3);
        }
    }

    #[test]
    fn arc_points_lie_on_radius(
        n in 0usize..32,
        r in 0.0f64..1000.0,
        start in -PI..PI,
        span in 0.0f64..TAU,
    ) {
        let c = vector![123.0, -77.0];
        let pts = arc(n, c, r, start, span);
        prop_assert_eq!(pts.len(), n);
        for p in pts {
            prop_assert!(((p.to_vec() - c).norm() - r).abs() <= 1.0);
        }
    }
}
