//! Layout schemes: named anchor tables plus node sizing for the cluster composer.
//!
//! A scheme is plain data. Two are built in (`architecture`, `ecosystem`); any
//! other scheme is a JSON file with the same shape, e.g.
//!
//! ```json
//! {
//!   "name": "domains",
//!   "header_prefix": "domain",
//!   "header_level": 3,
//!   "header_size": {"width": 260, "height": 100},
//!   "member_size": {"width": 220, "height": 100},
//!   "anchors": [
//!     {"category": "Web Dashboard", "label": "Dashboards", "x": 0, "y": 0, "color": "2",
//!      "spread": {"kind": "circle", "radius": 300}}
//!   ]
//! }
//! ```

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::Color;
use crate::error::{Error, Result};
use crate::geom::{Px, Size, Spread};

/// Catch-all category used by schemes that keep unmatched items visible.
pub const OTHER: &str = "other";

/// Names accepted by [`Scheme::builtin`].
pub const BUILTIN_NAMES: &[&str] = &["architecture", "ecosystem"];

/// Fixed position, colour, and member spread for one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub category: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    pub x: i64,
    pub y: i64,
    pub color: Color,
    pub spread: Spread,
}

impl Anchor {
    #[inline]
    pub fn pos(&self) -> Px {
        Px::new(self.x, self.y)
    }

    /// `"📚 Library"`, or just the label when there is no icon.
    pub fn display_name(&self) -> String {
        if self.icon.is_empty() {
            self.label.clone()
        } else {
            format!("{} {}", self.icon, self.label)
        }
    }
}

fn default_noun() -> String {
    "repos".to_string()
}

fn default_member_dir() -> String {
    crate::vault::REPOS_DIR.to_string()
}

fn default_level() -> usize {
    2
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    /// Header node ids are `<prefix>-<category slug>`.
    pub header_prefix: String,
    /// Markdown heading level of the header text.
    #[serde(default = "default_level")]
    pub header_level: usize,
    /// Header top-left relative to the anchor point.
    #[serde(default)]
    pub header_offset: Px,
    pub header_size: Size,
    pub member_size: Size,
    #[serde(default = "default_noun")]
    pub member_noun: String,
    /// Vault directory holding one `<member>.md` note per member.
    #[serde(default = "default_member_dir")]
    pub member_dir: String,
    pub anchors: Vec<Anchor>,
}

impl Scheme {
    /// Four cardinal anchors around a central title, members on 120° arcs
    /// facing away from the centre.
    pub fn architecture() -> Self {
        let arc = |radius: f64, facing: f64| Spread::Arc {
            radius,
            start_angle: facing - PI / 3.0,
            span: TAU / 3.0,
        };
        let anchor = |category: &str, icon: &str, x, y, color, spread| Anchor {
            category: category.to_string(),
            label: category.to_string(),
            icon: icon.to_string(),
            x,
            y,
            color,
            spread,
        };
        Scheme {
            name: "architecture".to_string(),
            header_prefix: "arch".to_string(),
            header_level: 2,
            header_offset: Px::default(),
            header_size: Size::new(250, 120),
            member_size: Size::new(220, 100),
            member_noun: default_noun(),
            member_dir: default_member_dir(),
            anchors: vec![
                anchor("Library", "📚", -700, -100, Color::RED, arc(500.0, PI)),
                anchor("Frontend", "🎨", 500, -100, Color::ORANGE, arc(500.0, 0.0)),
                anchor("Research", "🔬", -200, 400, Color::YELLOW, arc(400.0, FRAC_PI_2)),
                anchor(
                    "Fullstack",
                    "🌐",
                    -200,
                    -600,
                    Color::GREEN,
                    arc(350.0, 3.0 * FRAC_PI_2),
                ),
            ],
        }
    }

    /// Project families on a grid, members on full circles; `other` collects
    /// repositories outside every family.
    pub fn ecosystem() -> Self {
        let family = |category: &str, x, y, color| Anchor {
            category: category.to_string(),
            label: format!("{} Ecosystem", category.to_uppercase()),
            icon: String::new(),
            x,
            y,
            color,
            spread: Spread::Circle {
                radius: 250.0,
                start_angle: 0.0,
            },
        };
        Scheme {
            name: "ecosystem".to_string(),
            header_prefix: "cluster".to_string(),
            header_level: 3,
            header_offset: Px::new(-150, -200),
            header_size: Size::new(300, 100),
            member_size: Size::new(240, 120),
            member_noun: "repositories".to_string(),
            member_dir: default_member_dir(),
            anchors: vec![
                family("fib0", -1200, 0, Color::RED),
                family("sspr", -400, 0, Color::ORANGE),
                family("fcag", 400, 0, Color::YELLOW),
                family("tropical", 1200, 0, Color::GREEN),
                family("claude", -800, 800, Color::CYAN),
                family(OTHER, 0, 800, Color::PURPLE),
            ],
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "architecture" => Some(Self::architecture()),
            "ecosystem" => Some(Self::ecosystem()),
            _ => None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&raw).map_err(|e| Error::json(path, e))
    }

    /// Built-in name, or a path to a scheme JSON file.
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        if let Some(s) = Self::builtin(name_or_path) {
            return Ok(s);
        }
        let path = Path::new(name_or_path);
        if path.extension().is_some_and(|e| e == "json") || path.is_file() {
            return Self::from_path(path);
        }
        Err(Error::UnknownScheme(name_or_path.to_string()))
    }

    pub fn anchor(&self, category: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.category == category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.anchors.iter().map(|a| a.category.as_str())
    }

    pub fn header_id(&self, category: &str) -> String {
        format!("{}-{}", self.header_prefix, slug(category))
    }

    pub fn header_text(&self, anchor: &Anchor, count: usize) -> String {
        format!(
            "{} {}\n{} {}",
            "#".repeat(self.header_level.clamp(1, 6)),
            anchor.display_name(),
            count,
            self.member_noun
        )
    }

    pub fn member_file(&self, member: &str) -> String {
        format!("{}/{}.md", self.member_dir, member)
    }
}

/// Lowercase, with runs of non-alphanumerics collapsed to `-`.
pub fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
