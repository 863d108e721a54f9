//! Heuristic repository analysis and relationship discovery.
//!
//! Used for records that carry no analysis of their own. Classification reads
//! whole lowercase words of the description, so "build" never matches "ui".

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::inventory::{Architecture, Inventory, RepoRecord, OTHER_DOMAIN};

pub const MAX_TECH: usize = 5;
pub const MAX_TAGS: usize = 5;
pub const MAX_RELATED: usize = 8;
/// Same-domain links stop once this many relations are known.
pub const DOMAIN_LINK_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub tech_stack: Vec<String>,
    pub domain: String,
    pub purpose: String,
    pub architecture: Architecture,
    pub suggested_tags: Vec<String>,
    pub related_patterns: Vec<String>,
}

fn words(s: &str) -> BTreeSet<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn any_word(words: &BTreeSet<String>, keys: &[&str]) -> bool {
    keys.iter().any(|k| words.contains(*k))
}

/// (keywords, domain, architecture), first match wins.
const DOMAIN_RULES: &[(&[&str], &str, Architecture)] = &[
    (
        &["dashboard", "ui", "frontend"],
        "Web Dashboard",
        Architecture::Frontend,
    ),
    (&["api", "backend", "server"], "Backend API", Architecture::Backend),
    (
        &["mobile", "ios", "android", "app"],
        "Mobile App",
        Architecture::Mobile,
    ),
    (
        &["research", "paper", "ml", "ai"],
        "AI/ML Research",
        Architecture::Research,
    ),
    (&["platform", "system"], "Platform", Architecture::Fullstack),
];

/// Work-project and ecosystem tags keyed by name fragment.
const NAME_TAGS: &[(&str, &str)] = &[
    ("sspr", "work-project"),
    ("fcag", "work-project"),
    ("fib0", "fib0-ecosystem"),
    ("claude", "claude-ai"),
];

fn push_unique(v: &mut Vec<String>, s: &str) {
    if !v.iter().any(|x| x == s) {
        v.push(s.to_string());
    }
}

/// Classify one repository from its name, description, language, and topics.
pub fn heuristic_analysis(rec: &RepoRecord) -> Analysis {
    let desc = words(&rec.description);
    let topics: BTreeSet<String> = rec.topics.iter().map(|t| t.to_lowercase()).collect();
    let name = rec.name.to_lowercase();
    let language = rec
        .language
        .as_deref()
        .map(str::to_lowercase)
        .filter(|l| !l.is_empty() && l != "unknown");

    let mut tech_stack = Vec::new();
    if let Some(l) = &language {
        push_unique(&mut tech_stack, l);
    }
    if desc.contains("react") || topics.contains("react") {
        push_unique(&mut tech_stack, "react");
    }
    if name.contains("next") || topics.contains("nextjs") {
        push_unique(&mut tech_stack, "nextjs");
    }
    if desc.contains("fastapi") {
        push_unique(&mut tech_stack, "fastapi");
    }
    if desc.contains("django") {
        push_unique(&mut tech_stack, "django");
    }
    if topics.contains("typescript") {
        push_unique(&mut tech_stack, "typescript");
    }
    tech_stack.truncate(MAX_TECH);

    let (domain, architecture) = DOMAIN_RULES
        .iter()
        .find(|(keys, _, _)| any_word(&desc, keys))
        .map(|(_, d, a)| (d.to_string(), a.clone()))
        .unwrap_or_else(|| (OTHER_DOMAIN.to_string(), Architecture::Library));

    let mut suggested_tags = Vec::new();
    if name.contains("dashboard") {
        push_unique(&mut suggested_tags, "dashboard");
    }
    if let Some(l) = &language {
        push_unique(&mut suggested_tags, l);
    }
    for (fragment, tag) in NAME_TAGS {
        if name.contains(fragment) {
            push_unique(&mut suggested_tags, tag);
        }
    }
    suggested_tags.truncate(MAX_TAGS);

    let mut related_patterns = Vec::new();
    match architecture {
        Architecture::Frontend => related_patterns.push("needs backend".to_string()),
        Architecture::Backend => related_patterns.push("needs frontend".to_string()),
        _ => {}
    }
    if desc.contains("database") {
        related_patterns.push("uses database".to_string());
    }

    let purpose = if rec.description.trim().is_empty() {
        "No description".to_string()
    } else {
        rec.description.chars().take(100).collect()
    };

    Analysis {
        tech_stack,
        domain,
        purpose,
        architecture,
        suggested_tags,
        related_patterns,
    }
}

fn shares_name_word(name: &str, other: &str) -> bool {
    other
        .split('-')
        .filter(|w| !w.is_empty())
        .any(|w| name.contains(w))
}

/// Related repositories of `rec` among `all`, in discovery order, at most [`MAX_RELATED`].
///
/// Rules, checked per candidate: same project family; frontend/backend pair
/// sharing a name word; at least two shared technologies; same domain (not
/// `Other`) while fewer than [`DOMAIN_LINK_LIMIT`] relations are known.
pub fn find_related<S: AsRef<str>>(
    rec: &RepoRecord,
    all: &[RepoRecord],
    families: &[S],
) -> Vec<String> {
    let name = rec.name.to_lowercase();
    let tech: HashSet<&str> = rec.tech_stack.iter().map(String::as_str).collect();
    let mut related: Vec<String> = Vec::new();

    for other in all.iter().filter(|o| o.name != rec.name) {
        let other_name = other.name.to_lowercase();

        let same_family = families.iter().any(|f| {
            let f = f.as_ref().to_lowercase();
            name.contains(&f) && other_name.contains(&f)
        });

        let pair = matches!(
            (&rec.architecture, &other.architecture),
            (Some(Architecture::Frontend), Some(Architecture::Backend))
                | (Some(Architecture::Backend), Some(Architecture::Frontend))
        ) && shares_name_word(&name, &other_name);

        let other_tech: HashSet<&str> = other.tech_stack.iter().map(String::as_str).collect();
        let shared_tech = tech.intersection(&other_tech).count() >= 2;

        let same_domain = related.len() < DOMAIN_LINK_LIMIT
            && rec.domain.is_some()
            && rec.domain.as_deref() != Some(OTHER_DOMAIN)
            && rec.domain == other.domain;

        if same_family || pair || shared_tech || same_domain {
            push_unique(&mut related, &other.name);
        }
    }
    related.truncate(MAX_RELATED);
    related
}

/// Counts from [`Inventory::enrich`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub analysed: usize,
    pub relations: usize,
}

impl Inventory {
    /// Fill missing architecture, domain, purpose, tech stack, and tags heuristically,
    /// then recompute `related` for every record.
    pub fn enrich<S: AsRef<str>>(&mut self, families: &[S]) -> EnrichReport {
        let mut report = EnrichReport::default();
        for rec in &mut self.repos {
            let incomplete = rec.architecture.is_none()
                || rec.domain.is_none()
                || rec.purpose.is_none()
                || rec.tech_stack.is_empty();
            if !incomplete {
                continue;
            }
            let a = heuristic_analysis(rec);
            rec.architecture.get_or_insert(a.architecture);
            rec.domain.get_or_insert(a.domain);
            rec.purpose.get_or_insert(a.purpose);
            if rec.tech_stack.is_empty() {
                rec.tech_stack = a.tech_stack;
            }
            if rec.tags.is_empty() {
                rec.tags = a.suggested_tags;
            }
            tracing::debug!(repo = %rec.name, "heuristic analysis applied");
            report.analysed += 1;
        }

        let related: Vec<Vec<String>> = self
            .repos
            .iter()
            .map(|r| find_related(r, &self.repos, families))
            .collect();
        for (rec, rel) in self.repos.iter_mut().zip(related) {
            report.relations += rel.len();
            rec.related = rel;
        }
        report
    }
}
