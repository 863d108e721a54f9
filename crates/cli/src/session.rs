//! One generator run against a vault: the loaded inventory plus every path
//! written so far.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use vaultmap::canvas::write_canvas;
use vaultmap::groups::{build_groups, update_graph_json};
use vaultmap::notes::{merge_repo_note, render_architecture_map};
use vaultmap::scenes::{self, Scene};
use vaultmap::scheme::OTHER;
use vaultmap::vault::{write_document, VaultPaths};
use vaultmap::{Inventory, Scheme};

pub struct Session {
    paths: VaultPaths,
    inventory_path: PathBuf,
    inventory: Inventory,
    families: Vec<String>,
    outputs: Vec<PathBuf>,
}

impl Session {
    /// Load the inventory (default `<vault>/Repositories/inventory.json`) and
    /// fill missing analysis fields in memory.
    pub fn open(vault: &Path, inventory: Option<&Path>) -> Result<Self> {
        let paths = VaultPaths::new(vault);
        let inventory_path = inventory
            .map(Path::to_path_buf)
            .unwrap_or_else(|| paths.inventory());
        let mut inv = Inventory::load(&inventory_path)
            .with_context(|| format!("loading inventory {}", inventory_path.display()))?;
        let families: Vec<String> = Scheme::ecosystem()
            .categories()
            .filter(|c| *c != OTHER)
            .map(str::to_string)
            .collect();
        let report = inv.enrich(&families);
        tracing::info!(
            repos = inv.len(),
            analysed = report.analysed,
            relations = report.relations,
            "inventory loaded"
        );
        Ok(Self {
            paths,
            inventory_path,
            inventory: inv,
            families,
            outputs: Vec::new(),
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    /// Write the enriched inventory back, to `out` or over the input file.
    pub fn save_inventory(&mut self, out: Option<&Path>) -> Result<usize> {
        let target = out.map(Path::to_path_buf).unwrap_or_else(|| self.inventory_path.clone());
        self.inventory
            .save(&target)
            .with_context(|| format!("writing {}", target.display()))?;
        tracing::info!(path = %target.display(), repos = self.inventory.len(), "inventory saved");
        self.outputs.push(target);
        Ok(self.inventory.len())
    }

    pub fn architecture_map(&mut self, updated: &str) -> Result<()> {
        let path = self.paths.architecture_map();
        let body = render_architecture_map(&self.inventory, &self.families, updated);
        write_document(&path, &body).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), repos = self.inventory.len(), "architecture map written");
        self.outputs.push(path);
        Ok(())
    }

    /// Merge each record's analysis into its note under `Repositories/`.
    pub fn repo_notes(&mut self) -> Result<usize> {
        for rec in &self.inventory.repos {
            let path = self.paths.repo_note(&rec.name);
            let existing = match fs::read_to_string(&path) {
                Ok(text) => Some(text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
            };
            let body = merge_repo_note(existing.as_deref(), rec);
            write_document(&path, &body).with_context(|| format!("writing {}", path.display()))?;
            tracing::debug!(path = %path.display(), created = existing.is_none(), "repository note written");
            self.outputs.push(path);
        }
        tracing::info!(notes = self.inventory.len(), "repository notes written");
        Ok(self.inventory.len())
    }

    fn write_scene(&mut self, path: PathBuf, scene: &Scene) -> Result<()> {
        scene
            .canvas
            .validate()
            .with_context(|| format!("canvas {} is inconsistent", scene.stem))?;
        write_canvas(&path, &scene.canvas).with_context(|| format!("writing {}", path.display()))?;
        self.outputs.push(path);
        Ok(())
    }

    /// Build the `view` graph with `scheme` and write it under `Repositories/Graphs`.
    pub fn graph(&mut self, view: View, scheme: &Scheme) -> Result<()> {
        let scene = match view {
            View::Repository => scenes::repository_graph(&self.inventory, scheme),
            View::Ecosystem => scenes::ecosystem_graph(&self.inventory, scheme),
        };
        let path = self.paths.graph(&scene.stem);
        self.write_scene(path.clone(), &scene)?;
        tracing::info!(
            path = %path.display(),
            scheme = %scheme.name,
            nodes = scene.canvas.nodes.len(),
            edges = scene.canvas.edges.len(),
            "graph written"
        );
        Ok(())
    }

    pub fn architecture_canvases(&mut self, scheme: &Scheme) -> Result<usize> {
        let scenes = scenes::architecture_canvases(&self.inventory, scheme);
        for scene in &scenes {
            let path = self.paths.graph(&scene.stem);
            self.write_scene(path, scene)?;
        }
        tracing::info!(canvases = scenes.len(), "architecture canvases written");
        Ok(scenes.len())
    }

    pub fn repo_canvases(&mut self, scheme: &Scheme) -> Result<usize> {
        let scenes = scenes::repo_canvases(&self.inventory, scheme);
        for scene in &scenes {
            let path = self.paths.repo_canvas(&scene.stem);
            self.write_scene(path, scene)?;
        }
        tracing::info!(canvases = scenes.len(), "repository canvases written");
        Ok(scenes.len())
    }

    pub fn graph_groups(&mut self, scheme: &Scheme) -> Result<usize> {
        let path = self.paths.graph_settings();
        let groups = build_groups(&self.inventory, scheme);
        update_graph_json(&path, &groups).with_context(|| format!("updating {}", path.display()))?;
        tracing::info!(path = %path.display(), groups = groups.len(), "graph groups written");
        self.outputs.push(path);
        Ok(groups.len())
    }
}

/// Which repository graph to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    /// Clusters by architecture around a central title.
    Repository,
    /// Clusters by project family.
    Ecosystem,
}

impl View {
    pub fn default_scheme(self) -> &'static str {
        match self {
            View::Repository => "architecture",
            View::Ecosystem => "ecosystem",
        }
    }
}
