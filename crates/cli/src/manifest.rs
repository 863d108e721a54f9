use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What one run was asked to do and what it wrote.
pub struct RunRecord {
    pub command: String,
    pub params: Value,
    pub outputs: Vec<PathBuf>,
}

impl RunRecord {
    pub fn new(command: impl Into<String>, params: Value) -> Self {
        Self {
            command: command.into(),
            params,
            outputs: Vec::new(),
        }
    }
}

/// Write the run manifest to `path`: code revision, tool version, callsite,
/// params, and the written artifacts relative to `vault` where possible.
#[track_caller]
pub fn write_manifest<P: AsRef<Path>>(path: P, vault: &Path, record: &RunRecord) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating manifest dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let outputs: Vec<String> = record
        .outputs
        .iter()
        .map(|p| relative_to(p, vault))
        .collect();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": vaultmap::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "command": record.command,
        "params": record.params,
        "outputs": outputs
    });
    fs::write(path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn relative_to(p: &Path, base: &Path) -> String {
    p.strip_prefix(base)
        .unwrap_or(p)
        .to_string_lossy()
        .into_owned()
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn outputs_are_vault_relative() {
        let vault = Path::new("/vault");
        assert_eq!(
            relative_to(Path::new("/vault/Repositories/Graphs/x.canvas"), vault),
            "Repositories/Graphs/x.canvas"
        );
        assert_eq!(relative_to(Path::new("/elsewhere/a"), vault), "/elsewhere/a");
    }

    #[test]
    fn write_manifest_creates_file() {
        let dir = tempdir().unwrap();
        let mut record = RunRecord::new("graph", json!({"scheme": "architecture"}));
        record.outputs.push(dir.path().join("Repositories/Graphs/Repository Graph.canvas"));
        let path = dir.path().join("runs").join("manifest.json");
        write_manifest(&path, dir.path(), &record).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed["command"], "graph");
        assert_eq!(parsed["params"]["scheme"], "architecture");
        assert_eq!(parsed["outputs"][0], "Repositories/Graphs/Repository Graph.canvas");
        assert!(parsed["code_rev"].is_string());
    }
}
