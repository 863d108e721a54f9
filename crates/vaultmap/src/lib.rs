//! Radial canvas layouts for a note vault.
//!
//! Items (repositories) are grouped by a category, each category gets a fixed
//! anchor from a [`Scheme`], and members are spread on a circle or arc around
//! it. The result is a JSON Canvas document plus a few companion artifacts
//! (the Architecture Map note, graph-view colour groups).
//!
//! Layering, bottom-up:
//! - `geom`: angles, polar placement, pixel rounding, edge sides.
//! - `canvas`: node/edge model, validation, JSON emission.
//! - `scheme` + `compose`: anchor tables and the pure cluster composer.
//! - `inventory` + `analysis`: structured repository records and heuristic enrichment.
//! - `scenes`, `notes`, `groups`: the concrete vault artifacts.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.

pub mod analysis;
pub mod canvas;
pub mod compose;
pub mod error;
pub mod geom;
pub mod groups;
pub mod inventory;
pub mod notes;
pub mod scenes;
pub mod scheme;
pub mod vault;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use canvas::{Canvas, Color, Edge, Node, NodeKind};
pub use compose::{compose, Composition};
pub use error::{Error, Result};
pub use inventory::{Architecture, Inventory, RepoRecord};
pub use scheme::{Anchor, Scheme};

/// Common exports for callers that build layouts directly.
pub mod prelude {
    pub use crate::canvas::{Canvas, Color, Edge, Node};
    pub use crate::compose::compose;
    pub use crate::geom::{
        arc, arc_inclusive, circle, polar, side_towards, Px, Side, Size, Spread, Vec2,
    };
    pub use crate::scheme::{Anchor, Scheme};
}
