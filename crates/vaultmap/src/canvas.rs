//! Canvas documents: positioned nodes, connecting edges, and the JSON emitter.
//!
//! The wire format is the vault's JSON Canvas layout: `{"nodes": [...], "edges": [...]}`
//! with `type`-tagged nodes, camelCase edge endpoints, and colour tags as strings.
//! Emission is a direct structural serialization; `validate` is the only place
//! the id invariants are checked.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::{Px, Side, Size};

/// Preset colour tag `1..=6` of the vault palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u8);

impl Color {
    pub const RED: Color = Color(1);
    pub const ORANGE: Color = Color(2);
    pub const YELLOW: Color = Color(3);
    pub const GREEN: Color = Color(4);
    pub const CYAN: Color = Color(5);
    pub const PURPLE: Color = Color(6);

    pub fn new(tag: u8) -> Result<Self> {
        if (1..=6).contains(&tag) {
            Ok(Color(tag))
        } else {
            Err(Error::InvalidColor(tag.to_string()))
        }
    }

    #[inline]
    pub const fn tag(self) -> u8 {
        self.0
    }
}

impl TryFrom<String> for Color {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        match s.trim().parse::<u8>() {
            Ok(tag) => Color::new(tag),
            Err(_) => Err(Error::InvalidColor(s)),
        }
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.0.to_string()
    }
}

/// What a node displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Inline Markdown.
    Text { text: String },
    /// Embedded vault document, by vault-relative path.
    File { file: String },
}

/// Positioned rectangle; `x`/`y` are the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Node {
    pub fn text(id: impl Into<String>, text: impl Into<String>, at: Px, size: Size) -> Self {
        Self::new(id.into(), NodeKind::Text { text: text.into() }, at, size)
    }

    pub fn file(id: impl Into<String>, file: impl Into<String>, at: Px, size: Size) -> Self {
        Self::new(id.into(), NodeKind::File { file: file.into() }, at, size)
    }

    fn new(id: String, kind: NodeKind, at: Px, size: Size) -> Self {
        Self {
            id,
            kind,
            x: at.x,
            y: at.y,
            width: size.width,
            height: size.height,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    pub fn pos(&self) -> Px {
        Px::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Directed connector between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub from_node: String,
    pub to_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_side: Option<Side>,
}

impl Edge {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from_node: from.into(),
            to_node: to.into(),
            color: None,
            from_side: None,
            to_side: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_sides(mut self, from: Side, to: Side) -> Self {
        self.from_side = Some(from);
        self.to_side = Some(to);
        self
    }
}

/// A full canvas document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Append another node/edge collection, preserving order.
    pub fn extend(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes.extend(nodes);
        self.edges.extend(edges);
    }

    /// Check that node ids are unique and every edge endpoint exists.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for n in &self.nodes {
            if !seen.insert(n.id.as_str()) {
                return Err(Error::DuplicateNode(n.id.clone()));
            }
        }
        for e in &self.edges {
            for end in [&e.from_node, &e.to_node] {
                if !seen.contains(end.as_str()) {
                    return Err(Error::DanglingEdge {
                        edge: e.id.clone(),
                        node: end.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Read a canvas file.
pub fn read_canvas(path: impl AsRef<Path>) -> Result<Canvas> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| Error::json(path, e))
}

/// Write `canvas` to `path`, creating parent directories and replacing any existing file.
pub fn write_canvas(path: impl AsRef<Path>, canvas: &Canvas) -> Result<()> {
    let path = path.as_ref();
    crate::vault::write_document(path, &canvas.to_json()?)?;
    tracing::debug!(
        path = %path.display(),
        nodes = canvas.nodes.len(),
        edges = canvas.edges.len(),
        "canvas written"
    );
    Ok(())
}
