//! Where generated documents live inside the vault.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const REPOS_DIR: &str = "Repositories";
pub const GRAPHS_DIR: &str = "Repositories/Graphs";
pub const INDIVIDUAL_DIR: &str = "Repositories/Graphs/Individual Repos";
pub const ARCH_MAP_NOTE: &str = "Repositories/Architecture Map.md";
pub const REPOS_HUB_NOTE: &str = "💻 Repositories Hub.md";
pub const GRAPH_SETTINGS: &str = ".obsidian/graph.json";
/// Default location of the inventory document.
pub const INVENTORY_FILE: &str = "Repositories/inventory.json";

/// Output paths resolved against a vault root.
#[derive(Clone, Debug)]
pub struct VaultPaths {
    root: PathBuf,
}

impl VaultPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn architecture_map(&self) -> PathBuf {
        self.root.join(ARCH_MAP_NOTE)
    }

    /// `Repositories/Graphs/<stem>.canvas`
    pub fn graph(&self, stem: &str) -> PathBuf {
        self.root.join(GRAPHS_DIR).join(format!("{stem}.canvas"))
    }

    /// `Repositories/Graphs/Individual Repos/<repo>.canvas`
    pub fn repo_canvas(&self, repo: &str) -> PathBuf {
        self.root
            .join(INDIVIDUAL_DIR)
            .join(format!("{}.canvas", safe_file_name(repo)))
    }

    /// `Repositories/<repo>.md`
    pub fn repo_note(&self, repo: &str) -> PathBuf {
        self.root
            .join(REPOS_DIR)
            .join(format!("{}.md", safe_file_name(repo)))
    }

    pub fn graph_settings(&self) -> PathBuf {
        self.root.join(GRAPH_SETTINGS)
    }

    pub fn inventory(&self) -> PathBuf {
        self.root.join(INVENTORY_FILE)
    }
}

/// Repository names may carry an owner prefix; keep them to one path segment.
pub fn safe_file_name(name: &str) -> String {
    name.replace(['/', '\\'], "-")
}

/// Write a text document, creating parent directories and replacing any existing file.
pub fn write_document(path: impl AsRef<Path>, body: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::write(path, body).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_nest_under_root() {
        let v = VaultPaths::new("/vault");
        assert_eq!(
            v.graph("Repository Graph"),
            Path::new("/vault/Repositories/Graphs/Repository Graph.canvas")
        );
        assert_eq!(
            v.repo_canvas("me/fib0"),
            Path::new("/vault/Repositories/Graphs/Individual Repos/me-fib0.canvas")
        );
        assert_eq!(v.repo_note("me/fib0"), Path::new("/vault/Repositories/me-fib0.md"));
        assert_eq!(v.graph_settings(), Path::new("/vault/.obsidian/graph.json"));
        assert_eq!(v.inventory(), Path::new("/vault/Repositories/inventory.json"));
    }

    #[test]
    fn write_document_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("a/b/note.md");
        write_document(&p, "first").unwrap();
        write_document(&p, "second").unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "second");
    }
}
