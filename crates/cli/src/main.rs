use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;
use vaultmap::Scheme;

mod manifest;
mod session;

use manifest::{current_git_rev, write_manifest, RunRecord};
use session::{Session, View};

#[derive(Parser)]
#[command(name = "vaultmap")]
#[command(about = "Canvas layouts, maps, and graph groups for a note vault", version)]
struct Cmd {
    /// Vault root directory
    #[arg(long, env = "OBSIDIAN_VAULT_PATH")]
    vault: PathBuf,

    /// Inventory JSON (default: <vault>/Repositories/inventory.json)
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// Write a run manifest (code revision, params, outputs) to this path
    #[arg(long)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Fill missing analysis fields and related repos, then save the inventory
    Analyze {
        /// Write here instead of over the input inventory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the Architecture Map note
    Map {
        /// Frontmatter date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Write a clustered repository graph canvas
    Graph {
        #[arg(long, value_enum, default_value_t = View::Repository)]
        view: View,
        /// Built-in scheme name or scheme JSON path (default depends on the view)
        #[arg(long)]
        scheme: Option<String>,
    },
    /// Write one canvas per architecture
    ArchCanvases {
        #[arg(long, default_value = "architecture")]
        scheme: String,
    },
    /// Write one canvas per repository
    RepoCanvases {
        #[arg(long, default_value = "architecture")]
        scheme: String,
    },
    /// Merge the analysis and hub navigation into each repository note
    RepoNotes,
    /// Update graph-view colour groups in .obsidian/graph.json
    Groups {
        #[arg(long, default_value = "architecture")]
        scheme: String,
    },
    /// Map, repository notes, both graphs, all focus canvases, and graph groups
    All {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print a JSON summary of the inventory
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    run(cmd)
}

fn scheme(name: &str) -> Result<Scheme> {
    Scheme::resolve(name).with_context(|| format!("resolving scheme {name}"))
}

fn date_or_today(date: Option<NaiveDate>) -> String {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
        .format("%Y-%m-%d")
        .to_string()
}

fn run(cmd: Cmd) -> Result<()> {
    let mut s = Session::open(&cmd.vault, cmd.inventory.as_deref())?;
    let mut record = match cmd.action {
        Action::Analyze { out } => {
            let saved = s.save_inventory(out.as_deref())?;
            RunRecord::new("analyze", json!({ "repos": saved }))
        }
        Action::Map { date } => {
            let date = date_or_today(date);
            s.architecture_map(&date)?;
            RunRecord::new("map", json!({ "date": date }))
        }
        Action::Graph { view, scheme: name } => {
            let name = name.unwrap_or_else(|| view.default_scheme().to_string());
            s.graph(view, &scheme(&name)?)?;
            RunRecord::new("graph", json!({ "view": format!("{view:?}"), "scheme": name }))
        }
        Action::ArchCanvases { scheme: name } => {
            let n = s.architecture_canvases(&scheme(&name)?)?;
            RunRecord::new("arch-canvases", json!({ "scheme": name, "canvases": n }))
        }
        Action::RepoCanvases { scheme: name } => {
            let n = s.repo_canvases(&scheme(&name)?)?;
            RunRecord::new("repo-canvases", json!({ "scheme": name, "canvases": n }))
        }
        Action::RepoNotes => {
            let n = s.repo_notes()?;
            RunRecord::new("repo-notes", json!({ "notes": n }))
        }
        Action::Groups { scheme: name } => {
            let n = s.graph_groups(&scheme(&name)?)?;
            RunRecord::new("groups", json!({ "scheme": name, "groups": n }))
        }
        Action::All { date } => {
            let date = date_or_today(date);
            let arch = Scheme::architecture();
            s.architecture_map(&date)?;
            s.repo_notes()?;
            s.graph(View::Repository, &arch)?;
            s.graph(View::Ecosystem, &Scheme::ecosystem())?;
            s.architecture_canvases(&arch)?;
            s.repo_canvases(&arch)?;
            s.graph_groups(&arch)?;
            tracing::info!(outputs = s.outputs().len(), "all artifacts written");
            RunRecord::new("all", json!({ "date": date }))
        }
        Action::Report => {
            report(&s)?;
            RunRecord::new("report", json!({}))
        }
    };

    if let Some(path) = cmd.manifest {
        record.outputs = s.outputs().to_vec();
        write_manifest(&path, &cmd.vault, &record)?;
        tracing::info!(path = %path.display(), "manifest written");
    }
    Ok(())
}

fn report(s: &Session) -> Result<()> {
    let inv = s.inventory();
    let counts = |groups: std::collections::BTreeMap<String, Vec<String>>| {
        groups
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k, json!(v.len())))
            .collect::<serde_json::Map<_, _>>()
    };
    let obj = json!({
        "code_rev": current_git_rev(),
        "version": vaultmap::VERSION,
        "repos": inv.len(),
        "by_architecture": counts(inv.by_architecture()),
        "by_domain": counts(inv.by_domain()),
        "ecosystems": counts(inv.by_ecosystem(s.families(), None)),
        "technologies": inv.tech_usage().len()
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
