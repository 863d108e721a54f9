//! Concrete canvases generated from an inventory.
//!
//! Each builder returns a complete, valid [`Canvas`]; writing is the caller's job.

use std::collections::HashSet;
use std::f64::consts::PI;

use nalgebra::vector;

use crate::canvas::{Canvas, Color, Edge, Node};
use crate::compose::{compose, unique_id, Composition};
use crate::geom::{arc_inclusive, circle, side_towards, Px, Side, Size};
use crate::inventory::{Inventory, RepoRecord, UNKNOWN};
use crate::scheme::{slug, Anchor, Scheme, OTHER};
use crate::vault::{ARCH_MAP_NOTE, REPOS_HUB_NOTE};

/// Canvas plus the file stem it should be written under.
#[derive(Clone, Debug)]
pub struct Scene {
    pub stem: String,
    pub canvas: Canvas,
}

fn warn_skipped(scene: &str, comp: &Composition) {
    for cat in &comp.skipped {
        tracing::warn!(scene, category = %cat, "category has no anchor; not placed");
    }
}

/// Repositories clustered by architecture around a central title.
pub fn repository_graph(inv: &Inventory, scheme: &Scheme) -> Scene {
    let center = Px::new(-200, -100);
    let mut canvas = Canvas::new();
    canvas.nodes.push(
        Node::text(
            "center",
            format!("# Repository Map\n\n{} repos by {}", inv.len(), scheme.name),
            center,
            Size::new(400, 150),
        )
        .with_color(Color::PURPLE),
    );

    let comp = compose(scheme, &inv.by_architecture(), &["center", "arch-map-link"]);
    warn_skipped("repository graph", &comp);
    for cluster in &comp.clusters {
        let (from, to) = side_towards(center, cluster.header_pos);
        canvas.edges.push(
            Edge::new(
                format!("edge-{}", cluster.header_id),
                "center",
                cluster.header_id.clone(),
            )
            .with_color(cluster.color)
            .with_sides(from, to),
        );
    }
    canvas.extend(comp.nodes, comp.edges);

    canvas.nodes.push(Node::file(
        "arch-map-link",
        ARCH_MAP_NOTE,
        Px::new(-600, -400),
        Size::new(280, 80),
    ));
    canvas.edges.push(
        Edge::new("edge-arch-map", "center", "arch-map-link")
            .with_color(Color::PURPLE)
            .with_sides(Side::Top, Side::Bottom),
    );

    Scene {
        stem: "Repository Graph".to_string(),
        canvas,
    }
}

/// Repositories clustered by project family; unmatched repos land in `other`
/// when the scheme anchors it.
pub fn ecosystem_graph(inv: &Inventory, scheme: &Scheme) -> Scene {
    let families: Vec<&str> = scheme.categories().filter(|c| *c != OTHER).collect();
    let fallback = scheme.anchor(OTHER).map(|_| OTHER);
    let groups = inv.by_ecosystem(&families, fallback);

    let mut canvas = Canvas::new();
    canvas.nodes.push(
        Node::text(
            "title",
            "# Repository Ecosystem Map\n\nClustered by project family",
            Px::new(-400, -500),
            Size::new(800, 120),
        )
        .with_color(Color::PURPLE),
    );
    let comp = compose(scheme, &groups, &["title"]);
    warn_skipped("ecosystem graph", &comp);
    canvas.extend(comp.nodes, comp.edges);

    Scene {
        stem: "Ecosystem Graph".to_string(),
        canvas,
    }
}

fn arch_canvas_stem(anchor: &Anchor) -> String {
    format!("{} Repos", anchor.display_name())
}

/// One focused canvas per anchored architecture with members.
///
/// Navigation nodes link only to the other canvases built in the same call.
pub fn architecture_canvases(inv: &Inventory, scheme: &Scheme) -> Vec<Scene> {
    let groups = inv.by_architecture();
    let mut populated: Vec<(&Anchor, &[String])> = Vec::new();
    for anchor in &scheme.anchors {
        match groups.get(&anchor.category).filter(|r| !r.is_empty()) {
            Some(repos) => populated.push((anchor, repos.as_slice())),
            None => tracing::info!(architecture = %anchor.category, "no repos, canvas skipped"),
        }
    }
    let peers: Vec<&Anchor> = populated.iter().map(|(a, _)| *a).collect();
    populated
        .iter()
        .map(|(anchor, repos)| Scene {
            stem: arch_canvas_stem(anchor),
            canvas: architecture_canvas(anchor, repos, &peers, scheme),
        })
        .collect()
}

fn nav_id(anchor: &Anchor) -> String {
    format!("nav-{}", slug(&anchor.category))
}

fn architecture_canvas(
    anchor: &Anchor,
    repos: &[String],
    peers: &[&Anchor],
    scheme: &Scheme,
) -> Canvas {
    let others: Vec<&Anchor> = peers
        .iter()
        .copied()
        .filter(|a| a.category != anchor.category)
        .collect();
    let mut used: HashSet<String> = ["header", "arch-map"].map(String::from).into();
    used.extend(others.iter().map(|a| nav_id(a)));

    let mut canvas = Canvas::new();
    canvas.nodes.push(
        Node::text(
            "header",
            format!("# {}\n\n{} repositories", anchor.display_name(), repos.len()),
            Px::new(-200, -100),
            Size::new(400, 150),
        )
        .with_color(anchor.color),
    );

    let member = Size::new(240, 120);
    for (repo, p) in repos.iter().zip(circle(repos.len(), vector![0.0, 100.0], 500.0, 0.0)) {
        let id = unique_id(repo, &anchor.category, &used);
        used.insert(id.clone());
        canvas.nodes.push(Node::file(
            id.clone(),
            scheme.member_file(repo),
            member.centered_on(p),
            member,
        ));
        canvas.edges.push(
            Edge::new(format!("edge-{id}"), "header", id)
                .with_color(anchor.color)
                .with_sides(Side::Bottom, Side::Top),
        );
    }

    canvas.nodes.push(Node::file(
        "arch-map",
        ARCH_MAP_NOTE,
        Px::new(-140, -350),
        Size::new(280, 80),
    ));
    canvas.edges.push(
        Edge::new("edge-arch-map", "arch-map", "header")
            .with_color(Color::PURPLE)
            .with_sides(Side::Bottom, Side::Top),
    );

    // Navigation row above the map link.
    let mut x = -450;
    for other in others {
        let stem = arch_canvas_stem(other);
        canvas.nodes.push(
            Node::text(
                nav_id(other),
                format!("→ [[{stem}|{}]]", other.display_name()),
                Px::new(x, -500),
                Size::new(200, 60),
            )
            .with_color(other.color),
        );
        x += 250;
    }
    canvas
}

/// One canvas per repository: the repo in the centre, an info card above,
/// related repos on an arc below.
pub fn repo_canvases(inv: &Inventory, arch_scheme: &Scheme) -> Vec<Scene> {
    inv.repos
        .iter()
        .map(|r| Scene {
            stem: r.name.clone(),
            canvas: repo_canvas(r, inv, arch_scheme),
        })
        .collect()
}

fn repo_canvas(rec: &RepoRecord, inv: &Inventory, arch_scheme: &Scheme) -> Canvas {
    let mut canvas = Canvas::new();
    let arch_label = rec.architecture_label();
    let arch_anchor = arch_scheme.anchor(&arch_label);

    canvas.nodes.push(
        Node::file(
            "center",
            arch_scheme.member_file(&rec.name),
            Px::new(-200, 0),
            Size::new(400, 200),
        )
        .with_color(Color::PURPLE),
    );

    let tech = if rec.tech_stack.is_empty() {
        "N/A".to_string()
    } else {
        rec.tech_stack
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };
    let arch_key = rec
        .architecture
        .as_ref()
        .map(|a| a.key().to_string())
        .unwrap_or_else(|| UNKNOWN.to_lowercase());
    canvas.nodes.push(
        Node::text(
            "info",
            format!(
                "## {}\n\n**Architecture**: {}\n**Domain**: {}\n**Tech**: {}",
                rec.name,
                arch_key,
                rec.domain_or_other(),
                tech
            ),
            Px::new(-200, -300),
            Size::new(400, 180),
        )
        .with_color(Color::RED),
    );
    canvas.edges.push(
        Edge::new("edge-info", "info", "center")
            .with_color(Color::RED)
            .with_sides(Side::Bottom, Side::Top),
    );

    if !rec.related.is_empty() {
        canvas.nodes.push(
            Node::text(
                "related-header",
                format!(
                    "### Related Repositories\n{} connections",
                    rec.related.len()
                ),
                Px::new(-150, 300),
                Size::new(300, 100),
            )
            .with_color(Color::ORANGE),
        );
        canvas.edges.push(
            Edge::new("edge-related-header", "center", "related-header")
                .with_color(Color::ORANGE)
                .with_sides(Side::Bottom, Side::Top),
        );

        let member = Size::new(240, 120);
        let spots = arc_inclusive(
            rec.related.len(),
            vector![0.0, 300.0],
            400.0,
            PI / 4.0,
            1.5 * PI,
        );
        for (i, (name, p)) in rec.related.iter().zip(spots).enumerate() {
            let color = inv
                .get(name)
                .and_then(|r| arch_scheme.anchor(&r.architecture_label()))
                .map(|a| a.color)
                .unwrap_or(Color::YELLOW);
            let id = format!("related-{i}");
            canvas.nodes.push(
                Node::file(
                    id.clone(),
                    arch_scheme.member_file(name),
                    member.centered_on(p),
                    member,
                )
                .with_color(color),
            );
            canvas.edges.push(
                Edge::new(format!("edge-{id}"), "center", id)
                    .with_color(color)
                    .with_sides(Side::Bottom, Side::Top),
            );
        }
    }

    let (icon, label) = match arch_anchor {
        Some(a) if !a.icon.is_empty() => (a.icon.clone(), a.label.clone()),
        Some(a) => ("📁".to_string(), a.label.clone()),
        None => ("📁".to_string(), arch_label.clone()),
    };
    canvas.nodes.push(
        Node::text(
            "arch-link",
            format!("→ [[{icon} {label} Repos|All {label} Repos]]"),
            Px::new(-500, -300),
            Size::new(250, 80),
        )
        .with_color(Color::CYAN),
    );
    canvas.nodes.push(Node::file(
        "map-link",
        ARCH_MAP_NOTE,
        Px::new(300, -300),
        Size::new(250, 80),
    ));
    canvas.nodes.push(Node::file(
        "hub-link",
        REPOS_HUB_NOTE,
        Px::new(-125, -500),
        Size::new(250, 80),
    ));
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::NodeKind;
    use crate::inventory::Architecture;

    fn inventory() -> Inventory {
        let mk = |name: &str, arch: Architecture, related: &[&str]| RepoRecord {
            architecture: Some(arch),
            domain: Some("Other".into()),
            tech_stack: vec!["rust".into(), "tokio".into(), "serde".into(), "clap".into()],
            related: related.iter().map(|s| s.to_string()).collect(),
            ..RepoRecord::new(name)
        };
        Inventory::from_repos(vec![
            mk("fib0", Architecture::Library, &["fib0-code", "sspr-ui"]),
            mk("fib0-code", Architecture::Library, &["fib0"]),
            mk("sspr-ui", Architecture::Frontend, &[]),
            mk("agent-lab", Architecture::Research, &[]),
            mk("phone", Architecture::Mobile, &[]),
        ])
    }

    #[test]
    fn repository_graph_is_valid_and_skips_unanchored() {
        let scene = repository_graph(&inventory(), &Scheme::architecture());
        let c = &scene.canvas;
        c.validate().unwrap();
        assert_eq!(scene.stem, "Repository Graph");
        // center + 3 headers + 4 anchored repos + link; "phone" (Mobile) is not placed.
        assert_eq!(c.nodes.len(), 1 + 3 + 4 + 1);
        assert!(c.node("phone").is_none());
        let to_lib = c.edges.iter().find(|e| e.to_node == "arch-library").unwrap();
        assert_eq!(to_lib.from_side, Some(Side::Left));
        assert_eq!(to_lib.to_side, Some(Side::Right));
        let to_research = c.edges.iter().find(|e| e.to_node == "arch-research").unwrap();
        assert_eq!(to_research.from_side, Some(Side::Bottom));
    }

    #[test]
    fn ecosystem_graph_keeps_leftovers_in_other() {
        let scene = ecosystem_graph(&inventory(), &Scheme::ecosystem());
        let c = &scene.canvas;
        c.validate().unwrap();
        assert!(c.node("cluster-fib0").is_some());
        assert!(c.node("cluster-sspr").is_some());
        assert!(c.node("cluster-other").is_some());
        assert!(c.node("cluster-tropical").is_none());
        assert!(c.node("phone").is_some());
        assert!(c.node("agent-lab").is_some());
    }

    #[test]
    fn architecture_canvases_only_for_populated_anchors() {
        let scenes = architecture_canvases(&inventory(), &Scheme::architecture());
        let stems: Vec<_> = scenes.iter().map(|s| s.stem.as_str()).collect();
        assert_eq!(
            stems,
            vec!["📚 Library Repos", "🎨 Frontend Repos", "🔬 Research Repos"]
        );
        let lib = &scenes[0].canvas;
        lib.validate().unwrap();
        // header + 2 repos + map link + nav to Frontend and Research (Fullstack is empty)
        assert_eq!(lib.nodes.len(), 1 + 2 + 1 + 2);
        assert!(lib.node("nav-fullstack").is_none());
        assert_eq!(lib.edges.len(), 2 + 1);
        let nav = lib.node("nav-frontend").unwrap();
        match &nav.kind {
            NodeKind::Text { text } => {
                assert_eq!(text, "→ [[🎨 Frontend Repos|🎨 Frontend]]")
            }
            other => panic!("unexpected {other:?}"),
        }
        // Members sit on the radius-500 circle around (0, 100).
        let first = lib.node("fib0").unwrap();
        assert_eq!(first.pos(), Px::new(500 - 120, 100 - 60));
    }

    #[test]
    fn repo_canvas_colours_related_by_architecture() {
        let inv = inventory();
        let scenes = repo_canvases(&inv, &Scheme::architecture());
        assert_eq!(scenes.len(), inv.len());
        let fib0 = scenes.iter().find(|s| s.stem == "fib0").unwrap();
        let c = &fib0.canvas;
        c.validate().unwrap();
        assert_eq!(c.node("related-0").unwrap().color, Some(Color::RED));
        assert_eq!(c.node("related-1").unwrap().color, Some(Color::ORANGE));
        match &c.node("info").unwrap().kind {
            NodeKind::Text { text } => assert!(text.ends_with("**Tech**: rust, tokio, serde")),
            other => panic!("unexpected {other:?}"),
        }
        // Two related repos span the closed arc: first at π/4 from (0, 300).
        let p = c.node("related-0").unwrap().pos();
        assert_eq!(p, Px::new(283 - 120, 300 + 283 - 60));
    }

    #[test]
    fn repo_without_relations_has_no_related_header() {
        let inv = inventory();
        let scenes = repo_canvases(&inv, &Scheme::architecture());
        let phone = scenes.iter().find(|s| s.stem == "phone").unwrap();
        assert!(phone.canvas.node("related-header").is_none());
        match &phone.canvas.node("arch-link").unwrap().kind {
            NodeKind::Text { text } => assert_eq!(text, "→ [[📁 Mobile Repos|All Mobile Repos]]"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn repos_named_like_fixed_nodes_stay_distinct() {
        let lib = |n: &str| RepoRecord {
            architecture: Some(Architecture::Library),
            ..RepoRecord::new(n)
        };
        let inv = Inventory::from_repos(vec![
            lib("center"),
            lib("header"),
            lib("arch-map"),
            lib("nav-frontend"),
            RepoRecord {
                architecture: Some(Architecture::Frontend),
                ..RepoRecord::new("arch-library")
            },
        ]);
        let arch = Scheme::architecture();

        let graph = repository_graph(&inv, &arch).canvas;
        graph.validate().unwrap();
        assert!(graph.node("center@Library").is_some());
        assert!(graph.node("arch-library@Frontend").is_some());

        let scenes = architecture_canvases(&inv, &arch);
        for scene in &scenes {
            scene.canvas.validate().unwrap();
        }
        let c = &scenes[0].canvas;
        assert!(c.node("header@Library").is_some());
        assert!(c.node("arch-map@Library").is_some());
        assert!(c.node("nav-frontend@Library").is_some());
        assert!(c.node("center").is_some());

        let lone = Inventory::from_repos(vec![RepoRecord::new("title")]);
        let eco = ecosystem_graph(&lone, &Scheme::ecosystem());
        eco.canvas.validate().unwrap();
        assert!(eco.canvas.node("title@other").is_some());
    }

    #[test]
    fn repeated_inventory_names_get_suffixes() {
        let lib = |n: &str| RepoRecord {
            architecture: Some(Architecture::Library),
            ..RepoRecord::new(n)
        };
        let inv = Inventory::from_repos(vec![lib("dup"), lib("dup")]);
        let scenes = architecture_canvases(&inv, &Scheme::architecture());
        let c = &scenes[0].canvas;
        c.validate().unwrap();
        assert!(c.node("dup").is_some());
        assert!(c.node("dup@Library").is_some());
    }
}
