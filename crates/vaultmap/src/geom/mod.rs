//! Pixel-grid geometry for canvas layouts.
//!
//! Purpose
//! - Spread `n` items evenly around a circle or along a bounded arc and snap
//!   the results to integer canvas coordinates.
//! - Pick connection sides for edges between two anchors.
//!
//! Conventions
//! - Canvas space: x grows right, y grows down. Angle 0 points right and
//!   π/2 points down, so angles sweep clockwise on screen.
//! - Zero items yield an empty placement. Radius is not validated.

mod placement;
mod types;

pub use placement::{
    arc, arc_angles, arc_inclusive, arc_inclusive_angles, circle, circle_angles, polar,
    side_towards, Spread,
};
pub use types::{Px, Side, Size};

pub use nalgebra::Vector2 as Vec2;

#[cfg(test)]
mod tests;
