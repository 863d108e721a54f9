//! Integer canvas types: positions, sizes, and edge sides.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Integer canvas position (pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Px {
    pub x: i64,
    pub y: i64,
}

impl Px {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
    /// Snap a real-valued point to the pixel grid (round half away from zero).
    #[inline]
    pub fn snap(v: Vector2<f64>) -> Self {
        Self {
            x: v.x.round() as i64,
            y: v.y.round() as i64,
        }
    }
    #[inline]
    pub fn to_vec(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }
    #[inline]
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Node extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i64,
    pub height: i64,
}

impl Size {
    #[inline]
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
    /// Top-left corner that centres a box of this size on `p`.
    #[inline]
    pub const fn centered_on(self, p: Px) -> Px {
        Px {
            x: p.x - self.width / 2,
            y: p.y - self.height / 2,
        }
    }
}

/// Preferred attachment side of an edge end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
