//! Structured repository records: the single input of every generator.
//!
//! An inventory file is `{"repos": [{"name": "...", ...}, ...]}`. Only `name`
//! is required; analysis fields are filled by [`crate::analysis`] when absent.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Architectural role of a repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Architecture {
    Library,
    Frontend,
    Backend,
    Mobile,
    Research,
    Fullstack,
    /// Anything else, kept verbatim (lowercased).
    Other(String),
}

impl Architecture {
    /// Lowercase key as stored in records.
    pub fn key(&self) -> &str {
        match self {
            Architecture::Library => "library",
            Architecture::Frontend => "frontend",
            Architecture::Backend => "backend",
            Architecture::Mobile => "mobile",
            Architecture::Research => "research",
            Architecture::Fullstack => "fullstack",
            Architecture::Other(s) => s,
        }
    }

    /// Title-cased label used as grouping category, e.g. `Library`.
    pub fn label(&self) -> String {
        title_case(self.key())
    }
}

impl From<String> for Architecture {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "library" => Architecture::Library,
            "frontend" => Architecture::Frontend,
            "backend" => Architecture::Backend,
            "mobile" => Architecture::Mobile,
            "research" => Architecture::Research,
            "fullstack" => Architecture::Fullstack,
            other => Architecture::Other(other.to_string()),
        }
    }
}

impl From<Architecture> for String {
    fn from(a: Architecture) -> String {
        a.key().to_string()
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Uppercase the first letter of each whitespace/hyphen separated word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_start = true;
    for ch in s.chars() {
        if at_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_start = ch.is_whitespace() || ch == '-';
    }
    out
}

pub const UNKNOWN: &str = "Unknown";
pub const OTHER_DOMAIN: &str = "Other";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoRecord {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// One-line summary of what the repository is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

impl RepoRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn architecture_label(&self) -> String {
        self.architecture
            .as_ref()
            .map(Architecture::label)
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn domain_or_other(&self) -> &str {
        self.domain.as_deref().unwrap_or(OTHER_DOMAIN)
    }

    pub fn language_or_unknown(&self) -> &str {
        self.language.as_deref().unwrap_or(UNKNOWN)
    }
}

/// All repositories, sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub repos: Vec<RepoRecord>,
}

impl Inventory {
    pub fn from_repos(mut repos: Vec<RepoRecord>) -> Self {
        repos.sort_by(|a, b| a.name.cmp(&b.name));
        Self { repos }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let inv: Inventory = serde_json::from_str(&raw).map_err(|e| Error::json(path, e))?;
        let skipped = inv.repos.iter().filter(|r| r.name.trim().is_empty()).count();
        if skipped > 0 {
            tracing::warn!(path = %path.display(), skipped, "records without a name ignored");
        }
        let repos = inv
            .repos
            .into_iter()
            .filter(|r| !r.name.trim().is_empty())
            .collect();
        Ok(Self::from_repos(repos))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::vault::write_document(path, &serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RepoRecord> {
        self.repos.iter().find(|r| r.name == name)
    }

    fn group_by<F>(&self, key: F) -> BTreeMap<String, Vec<String>>
    where
        F: Fn(&RepoRecord) -> String,
    {
        let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for r in &self.repos {
            out.entry(key(r)).or_default().push(r.name.clone());
        }
        out
    }

    /// Architecture label → repos (`Unknown` when unclassified).
    pub fn by_architecture(&self) -> BTreeMap<String, Vec<String>> {
        self.group_by(RepoRecord::architecture_label)
    }

    pub fn by_domain(&self) -> BTreeMap<String, Vec<String>> {
        self.group_by(|r| r.domain_or_other().to_string())
    }

    pub fn by_language(&self) -> BTreeMap<String, Vec<String>> {
        self.group_by(|r| r.language_or_unknown().to_string())
    }

    /// Family → repos whose lowercase name contains the family prefix.
    ///
    /// A repo joins every family it matches. Repos matching none go to
    /// `fallback` when given, and are dropped otherwise. Families without
    /// members are present with an empty list.
    pub fn by_ecosystem<S: AsRef<str>>(
        &self,
        families: &[S],
        fallback: Option<&str>,
    ) -> BTreeMap<String, Vec<String>> {
        let mut out: BTreeMap<String, Vec<String>> = families
            .iter()
            .map(|f| (f.as_ref().to_string(), Vec::new()))
            .collect();
        for r in &self.repos {
            let lower = r.name.to_lowercase();
            let mut matched = false;
            for f in families {
                let f = f.as_ref();
                if lower.contains(&f.to_lowercase()) {
                    if let Some(members) = out.get_mut(f) {
                        members.push(r.name.clone());
                    }
                    matched = true;
                }
            }
            if !matched {
                if let Some(fb) = fallback {
                    out.entry(fb.to_string()).or_default().push(r.name.clone());
                }
            }
        }
        out
    }

    /// Technology → number of repos using it.
    pub fn tech_usage(&self) -> BTreeMap<String, usize> {
        let mut out: BTreeMap<String, usize> = BTreeMap::new();
        for r in &self.repos {
            for t in r.tech_stack.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
                *out.entry(t.to_string()).or_default() += 1;
            }
        }
        out
    }
}
