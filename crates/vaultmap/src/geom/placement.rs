//! Even angular placement on circles and arcs.
//!
//! Every placement is computed in two steps: the angle list (exact, f64) and
//! the snapped positions. The angle functions are public so callers and tests
//! can reason about spacing without pixel rounding.

use std::f64::consts::TAU;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::types::{Px, Side};

/// Point at `angle` on the circle of `radius` around `center`.
#[inline]
pub fn polar(center: Vector2<f64>, radius: f64, angle: f64) -> Vector2<f64> {
    center + Vector2::new(angle.cos(), angle.sin()) * radius
}

/// `n` angles covering the full circle: step `2π/n`, first at `start`.
pub fn circle_angles(n: usize, start: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let step = TAU / n as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// `n` angles on the arc `[start, start + span)`: step `span/n`.
/// A single item sits at the arc midpoint.
pub fn arc_angles(n: usize, start: f64, span: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start + span / 2.0],
        _ => {
            let step = span / n as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// `n` angles on the closed arc `[start, start + span]`, both endpoints used.
/// A single item sits at the arc midpoint.
pub fn arc_inclusive_angles(n: usize, start: f64, span: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start + span / 2.0],
        _ => {
            let step = span / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

#[inline]
fn snap_all(angles: Vec<f64>, center: Vector2<f64>, radius: f64) -> Vec<Px> {
    angles
        .into_iter()
        .map(|th| Px::snap(polar(center, radius, th)))
        .collect()
}

/// Positions for `n` items evenly spread around a full circle.
pub fn circle(n: usize, center: Vector2<f64>, radius: f64, start: f64) -> Vec<Px> {
    snap_all(circle_angles(n, start), center, radius)
}

/// Positions for `n` items on a bounded arc (see [`arc_angles`]).
pub fn arc(n: usize, center: Vector2<f64>, radius: f64, start: f64, span: f64) -> Vec<Px> {
    snap_all(arc_angles(n, start, span), center, radius)
}

/// Positions for `n` items on a closed arc (see [`arc_inclusive_angles`]).
pub fn arc_inclusive(
    n: usize,
    center: Vector2<f64>,
    radius: f64,
    start: f64,
    span: f64,
) -> Vec<Px> {
    snap_all(arc_inclusive_angles(n, start, span), center, radius)
}

/// Radial spread used for the members of one cluster.
///
/// Serialized with a `kind` tag, e.g. `{"kind": "arc", "radius": 500,
/// "start_angle": 2.618, "span": 2.094}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Spread {
    Circle {
        radius: f64,
        #[serde(default)]
        start_angle: f64,
    },
    Arc {
        radius: f64,
        start_angle: f64,
        span: f64,
    },
    ArcInclusive {
        radius: f64,
        start_angle: f64,
        span: f64,
    },
}

impl Spread {
    pub fn radius(&self) -> f64 {
        match *self {
            Spread::Circle { radius, .. }
            | Spread::Arc { radius, .. }
            | Spread::ArcInclusive { radius, .. } => radius,
        }
    }

    pub fn angles(&self, n: usize) -> Vec<f64> {
        match *self {
            Spread::Circle { start_angle, .. } => circle_angles(n, start_angle),
            Spread::Arc {
                start_angle, span, ..
            } => arc_angles(n, start_angle, span),
            Spread::ArcInclusive {
                start_angle, span, ..
            } => arc_inclusive_angles(n, start_angle, span),
        }
    }

    /// Snapped positions for `n` items around `center`.
    pub fn place(&self, n: usize, center: Vector2<f64>) -> Vec<Px> {
        snap_all(self.angles(n), center, self.radius())
    }
}

/// Connection sides for an edge running from the box at `from` to the box at `to`.
///
/// Horizontal offset wins; vertically stacked boxes connect bottom→top or
/// top→bottom. Coincident anchors fall back to top→bottom.
pub fn side_towards(from: Px, to: Px) -> (Side, Side) {
    let out = if to.x < from.x {
        Side::Left
    } else if to.x > from.x {
        Side::Right
    } else if to.y > from.y {
        Side::Bottom
    } else {
        Side::Top
    };
    (out, out.opposite())
}
