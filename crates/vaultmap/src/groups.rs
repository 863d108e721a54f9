//! Graph-view colour groups in the vault's `graph.json`.
//!
//! Only the `colorGroups` key is owned here; everything else in an existing
//! settings file is carried over untouched.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::canvas::Color;
use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::scheme::Scheme;
use crate::vault::REPOS_DIR;

/// Hub notes at the centre of the graph.
pub const HUB_NOTES: &[&str] = &[
    "🏠 Vault Home",
    "📚 Research Hub",
    "💻 Repositories Hub",
    "📓 Daily Notes Hub",
    "🚀 Projects Hub",
];

pub const PAPERS_QUERY: &str = r#"path:"Research/Heretic Enhancement/Paper""#;
pub const INDEX_QUERY: &str =
    r#"path:"Repositories/Architecture Map" OR path:"Repositories/README""#;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupColor {
    pub a: u8,
    pub rgb: u32,
}

impl From<Color> for GroupColor {
    fn from(c: Color) -> Self {
        Self {
            a: 1,
            rgb: palette_rgb(c),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorGroup {
    pub query: String,
    pub color: GroupColor,
}

/// RGB the vault renders for each preset canvas colour.
pub fn palette_rgb(c: Color) -> u32 {
    match c.tag() {
        1 => 0xfb464c,
        2 => 0xe9973f,
        3 => 0xe0de71,
        4 => 0x44cf6e,
        5 => 0x53dfdd,
        _ => 0xa882ff,
    }
}

fn any_path<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|p| format!("path:\"{}\"", p.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Hub notes, one group per anchored architecture with members, papers, and
/// index notes, in that order.
pub fn build_groups(inv: &Inventory, scheme: &Scheme) -> Vec<ColorGroup> {
    let mut groups = vec![ColorGroup {
        query: any_path(HUB_NOTES),
        color: Color::PURPLE.into(),
    }];

    let by_arch = inv.by_architecture();
    for anchor in &scheme.anchors {
        let Some(repos) = by_arch.get(&anchor.category).filter(|r| !r.is_empty()) else {
            continue;
        };
        groups.push(ColorGroup {
            query: any_path(repos.iter().map(|r| format!("{REPOS_DIR}/{r}"))),
            color: anchor.color.into(),
        });
    }

    groups.push(ColorGroup {
        query: PAPERS_QUERY.to_string(),
        color: Color::GREEN.into(),
    });
    groups.push(ColorGroup {
        query: INDEX_QUERY.to_string(),
        color: Color::YELLOW.into(),
    });
    groups
}

/// Graph settings used when the vault has none yet.
pub fn default_graph_config() -> Value {
    json!({
        "collapse-filter": false,
        "search": "",
        "showTags": true,
        "showAttachments": false,
        "hideUnresolved": false,
        "showOrphans": true,
        "collapse-color-groups": false,
        "colorGroups": [],
        "collapse-display": false,
        "showArrow": true,
        "textFadeMultiplier": 0,
        "nodeSizeMultiplier": 1,
        "lineSizeMultiplier": 1,
        "collapse-forces": false,
        "centerStrength": 0.518713248970312,
        "repelStrength": 10,
        "linkStrength": 1,
        "linkDistance": 250,
        "scale": 1,
        "close": false
    })
}

/// Replace `colorGroups` in `existing` (or the default config).
///
/// A non-object `existing` is discarded in favour of the default.
pub fn merge_graph_config(existing: Option<Value>, groups: &[ColorGroup]) -> Result<Value> {
    let mut obj: Map<String, Value> = match existing {
        Some(Value::Object(m)) => m,
        Some(_) => {
            tracing::warn!("graph settings are not a JSON object; starting from defaults");
            default_object()
        }
        None => default_object(),
    };
    obj.insert("colorGroups".to_string(), serde_json::to_value(groups)?);
    Ok(Value::Object(obj))
}

fn default_object() -> Map<String, Value> {
    match default_graph_config() {
        Value::Object(m) => m,
        _ => Map::new(),
    }
}

/// Read `path` if present, merge `groups`, write it back.
pub fn update_graph_json(path: impl AsRef<Path>, groups: &[ColorGroup]) -> Result<()> {
    let path = path.as_ref();
    let existing = if path.exists() {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Some(serde_json::from_str(&raw).map_err(|e| Error::json(path, e))?)
    } else {
        None
    };
    let merged = merge_graph_config(existing, groups)?;
    crate::vault::write_document(path, &serde_json::to_string_pretty(&merged)?)?;
    tracing::debug!(path = %path.display(), groups = groups.len(), "graph groups written");
    Ok(())
}
