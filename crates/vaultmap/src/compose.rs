//! Cluster layout composer.
//!
//! Turns `category → members` into one header node per anchored, non-empty
//! category, one member node per item spread radially around the anchor, and
//! one header→member edge per item. Pure: no I/O, no logging.

use std::collections::{BTreeMap, HashSet};

use crate::canvas::{Color, Edge, Node};
use crate::geom::{Px, Side};
use crate::scheme::Scheme;

/// Header placed for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedCluster {
    pub category: String,
    pub header_id: String,
    /// Top-left of the header node.
    pub header_pos: Px,
    pub color: Color,
    pub members: usize,
}

/// Nodes and edges produced by [`compose`], in anchor-table order.
#[derive(Clone, Debug, Default)]
pub struct Composition {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub clusters: Vec<PlacedCluster>,
    /// Non-empty categories without an anchor in the scheme.
    pub skipped: Vec<String>,
}

/// Lay out `groups` according to `scheme`.
///
/// Member node ids are the item names. An item whose name is already taken
/// gets `@<category>` appended, then a numeric suffix if that is taken too.
/// Taken means: listed in `reserved` (ids the caller places itself), a header
/// id of any cluster in this composition, or a member placed before it.
pub fn compose(
    scheme: &Scheme,
    groups: &BTreeMap<String, Vec<String>>,
    reserved: &[&str],
) -> Composition {
    let mut out = Composition::default();
    let populated: Vec<_> = scheme
        .anchors
        .iter()
        .filter(|a| groups.get(&a.category).is_some_and(|m| !m.is_empty()))
        .collect();
    let mut used: HashSet<String> = reserved.iter().map(|r| r.to_string()).collect();
    used.extend(populated.iter().map(|a| scheme.header_id(&a.category)));

    for anchor in populated {
        let Some(members) = groups.get(&anchor.category) else {
            continue;
        };

        let header_id = scheme.header_id(&anchor.category);
        let header_pos = anchor
            .pos()
            .offset(scheme.header_offset.x, scheme.header_offset.y);
        out.nodes.push(
            Node::text(
                header_id.clone(),
                scheme.header_text(anchor, members.len()),
                header_pos,
                scheme.header_size,
            )
            .with_color(anchor.color),
        );

        let positions = anchor.spread.place(members.len(), anchor.pos().to_vec());
        for (item, p) in members.iter().zip(positions) {
            let id = unique_id(item, &anchor.category, &used);
            used.insert(id.clone());
            out.nodes.push(Node::file(
                id.clone(),
                scheme.member_file(item),
                scheme.member_size.centered_on(p),
                scheme.member_size,
            ));
            out.edges.push(
                Edge::new(format!("{header_id}-{id}"), header_id.clone(), id)
                    .with_color(anchor.color)
                    .with_sides(Side::Bottom, Side::Top),
            );
        }

        out.clusters.push(PlacedCluster {
            category: anchor.category.clone(),
            header_id,
            header_pos,
            color: anchor.color,
            members: members.len(),
        });
    }

    out.skipped = groups
        .iter()
        .filter(|(cat, members)| !members.is_empty() && scheme.anchor(cat).is_none())
        .map(|(cat, _)| cat.clone())
        .collect();
    out
}

/// `item`, else `item@category`, else `item@category#k` for the first free `k >= 2`.
pub(crate) fn unique_id(item: &str, category: &str, used: &HashSet<String>) -> String {
    if !used.contains(item) {
        return item.to_string();
    }
    let base = format!("{item}@{category}");
    if !used.contains(&base) {
        return base;
    }
    (2..)
        .map(|k| format!("{base}#{k}"))
        .find(|id| !used.contains(id))
        .unwrap_or(base)
}
