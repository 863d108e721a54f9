//! Markdown written into the vault.
//!
//! - The Architecture Map note: a Markdown index of the inventory. Its
//!   `### <Architecture> (<n> repos)` sections list members as wiki links,
//!   which is what the vault's hub notes and graph groups link against.
//! - Per-repository notes: a generated analysis block plus a hub navigation
//!   line, merged into the existing note without touching hand-written text.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::inventory::{Inventory, RepoRecord, UNKNOWN};

/// Navigation line placed under a repository note's title.
pub const HUB_NAV: &str = "← [[💻 Repositories Hub|Repositories Hub]] | [[🏠 Vault Home|Home]]";
/// Delimiters of the generated block; everything between them is rewritten.
pub const ANALYSIS_BEGIN: &str = "<!-- vaultmap:analysis -->";
pub const ANALYSIS_END: &str = "<!-- /vaultmap:analysis -->";
/// Hand-written sections the analysis block goes in front of, first match wins.
const ANALYSIS_BEFORE: &[&str] = &["## Recent Commits", "## Notes"];

/// Technologies listed in the stack section.
pub const TOP_TECH: usize = 15;

/// `(name, members)` sorted by descending size, then name.
fn ranked(groups: BTreeMap<String, Vec<String>>) -> Vec<(String, Vec<String>)> {
    let mut v: Vec<_> = groups
        .into_iter()
        .map(|(k, mut members)| {
            members.sort();
            (k, members)
        })
        .collect();
    v.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
    v
}

fn push_section(out: &mut String, heading: &str, members: &[String]) {
    let _ = writeln!(out, "### {heading} ({} repos)\n", members.len());
    for m in members {
        let _ = writeln!(out, "- [[{m}]]");
    }
    out.push('\n');
}

/// Render the note body. `updated` goes into the frontmatter verbatim.
pub fn render_architecture_map<S: AsRef<str>>(
    inv: &Inventory,
    ecosystems: &[S],
    updated: &str,
) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "---\ntags: [architecture, map, index]\nupdated: {updated}\n---\n\n\
         # Repository Architecture Map\n\n\
         Complete architectural overview of all repositories organized by technical patterns.\n\n\
         ## Architecture Summary\n\n"
    );

    let total = inv.len();
    let _ = writeln!(out, "**Total Repositories**: {total}\n");
    let by_arch = ranked(inv.by_architecture());
    for (arch, members) in &by_arch {
        let pct = if total == 0 {
            0.0
        } else {
            members.len() as f64 / total as f64 * 100.0
        };
        let _ = writeln!(out, "- **{arch}**: {} repos ({pct:.1}%)", members.len());
    }

    out.push_str("\n## By Architecture Type\n\n");
    for (arch, members) in &by_arch {
        push_section(&mut out, arch, members);
    }

    out.push_str("## By Domain\n\n");
    for (domain, members) in ranked(inv.by_domain()) {
        push_section(&mut out, &domain, &members);
    }

    out.push_str("## By Language\n\n");
    for (lang, members) in ranked(inv.by_language()) {
        if lang == UNKNOWN {
            continue;
        }
        push_section(&mut out, &lang, &members);
    }

    out.push_str("## Technology Stack Analysis\n\nMost used technologies across all repositories:\n\n");
    let mut tech: Vec<_> = inv.tech_usage().into_iter().collect();
    tech.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (name, count) in tech.into_iter().take(TOP_TECH) {
        let _ = writeln!(out, "- **{name}**: {count} repos");
    }

    out.push_str("\n## Project Ecosystems\n\n");
    for (family, members) in ranked(inv.by_ecosystem(ecosystems, None)) {
        if members.is_empty() {
            continue;
        }
        push_section(&mut out, &format!("{} Ecosystem", family.to_uppercase()), &members);
    }
    out
}

/// `## Analysis` and `## Related Repositories` for one record, between the
/// [`ANALYSIS_BEGIN`]/[`ANALYSIS_END`] markers. No trailing newline.
pub fn render_repo_analysis(rec: &RepoRecord) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{ANALYSIS_BEGIN}\n## Analysis\n\n**Domain**: {}\n**Architecture**: {}\n**Purpose**: {}\n\n",
        rec.domain.as_deref().unwrap_or(UNKNOWN),
        rec.architecture.as_ref().map_or("unknown", |a| a.key()),
        rec.purpose.as_deref().unwrap_or("N/A"),
    );
    if !rec.tech_stack.is_empty() {
        let _ = writeln!(out, "**Tech Stack**: {}\n", rec.tech_stack.join(", "));
    }
    if !rec.tags.is_empty() {
        let tags: Vec<String> = rec.tags.iter().map(|t| format!("#{t}")).collect();
        let _ = writeln!(out, "**Tags**: {}\n", tags.join(", "));
    }
    if !rec.related.is_empty() {
        out.push_str("## Related Repositories\n\n");
        for r in &rec.related {
            let _ = writeln!(out, "- [[{r}]]");
        }
        out.push('\n');
    }
    out.push_str(ANALYSIS_END);
    out
}

/// Byte offset just past the first `# ` title line after any frontmatter.
fn title_end(text: &str) -> Option<usize> {
    let mut offset = 0;
    let mut in_frontmatter = false;
    let mut body = !text.starts_with("---");
    for line in text.split_inclusive('\n') {
        let t = line.trim_end();
        if !body {
            if t == "---" {
                body = in_frontmatter;
                in_frontmatter = true;
            }
        } else if t.starts_with("# ") {
            return Some(offset + line.len());
        }
        offset += line.len();
    }
    None
}

/// Merge the generated block and the hub navigation line into a repository note.
///
/// `existing` is the current note, if any. A previous block is replaced in
/// place; otherwise the block goes in front of the first `## Recent Commits`
/// or `## Notes` section, or at the end. The navigation line is added under
/// the title once. Merging the same record twice gives the same text.
pub fn merge_repo_note(existing: Option<&str>, rec: &RepoRecord) -> String {
    let block = render_repo_analysis(rec);
    let Some(text) = existing else {
        return format!("# {}\n\n{HUB_NAV}\n\n{block}\n", rec.name);
    };

    let mut note = text.to_string();
    if !note.contains("← [[💻 Repositories Hub") && !note.contains("← [[🏠 Vault Home") {
        match title_end(&note) {
            Some(at) => {
                let lead = if note[..at].ends_with('\n') { "" } else { "\n" };
                note.insert_str(at, &format!("{lead}\n{HUB_NAV}\n\n"));
            }
            None => note.insert_str(0, &format!("{HUB_NAV}\n\n")),
        }
    }

    if let Some(start) = note.find(ANALYSIS_BEGIN) {
        if let Some(len) = note[start..].find(ANALYSIS_END) {
            note.replace_range(start..start + len + ANALYSIS_END.len(), &block);
            return note;
        }
    }
    let before = ANALYSIS_BEFORE
        .iter()
        .find_map(|h| note.find(&format!("\n{h}")).map(|i| i + 1));
    match before {
        Some(at) => note.insert_str(at, &format!("{block}\n\n")),
        None => {
            if !note.ends_with('\n') {
                note.push('\n');
            }
            note.push('\n');
            note.push_str(&block);
            note.push('\n');
        }
    }
    note
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Architecture;

    fn rec(name: &str, arch: Architecture, lang: Option<&str>, tech: &[&str]) -> RepoRecord {
        RepoRecord {
            architecture: Some(arch),
            language: lang.map(str::to_string),
            tech_stack: tech.iter().map(|t| t.to_string()).collect(),
            ..RepoRecord::new(name)
        }
    }

    fn inventory() -> Inventory {
        Inventory::from_repos(vec![
            rec("fib0-code", Architecture::Library, Some("Rust"), &["rust", "serde"]),
            rec("fib0", Architecture::Library, Some("Rust"), &["rust"]),
            rec("sspr", Architecture::Frontend, None, &["react"]),
            rec("notes", Architecture::Research, Some("Python"), &[]),
        ])
    }

    #[test]
    fn frontmatter_and_summary() {
        let md = render_architecture_map(&inventory(), &["fib0", "sspr"], "2026-01-02");
        assert!(md.starts_with("---\ntags: [architecture, map, index]\nupdated: 2026-01-02\n---\n"));
        assert!(md.contains("**Total Repositories**: 4\n"));
        assert!(md.contains("- **Library**: 2 repos (50.0%)\n"));
        assert!(md.contains("- **Frontend**: 1 repos (25.0%)\n"));
    }

    #[test]
    fn sections_are_ranked_and_sorted() {
        let md = render_architecture_map(&inventory(), &["fib0", "sspr"], "d");
        assert!(md.contains("### Library (2 repos)\n\n- [[fib0]]\n- [[fib0-code]]\n"));
        // Ties break by name: Frontend before Research.
        let f = md.find("### Frontend (1 repos)").unwrap();
        let r = md.find("### Research (1 repos)").unwrap();
        assert!(f < r);
        assert!(md.find("### Library").unwrap() < f);
    }

    #[test]
    fn unknown_language_is_left_out() {
        let md = render_architecture_map(&inventory(), &["fib0"], "d");
        let lang = &md[md.find("## By Language").unwrap()..md.find("## Technology").unwrap()];
        assert!(lang.contains("### Rust (2 repos)"));
        assert!(lang.contains("### Python (1 repos)"));
        assert!(!lang.contains(UNKNOWN));
    }

    #[test]
    fn tech_and_ecosystems() {
        let md = render_architecture_map(&inventory(), &["fib0", "sspr", "tropical"], "d");
        assert!(md.contains("- **rust**: 2 repos\n- **react**: 1 repos\n- **serde**: 1 repos\n"));
        assert!(md.contains("### FIB0 Ecosystem (2 repos)"));
        assert!(md.contains("### SSPR Ecosystem (1 repos)"));
        assert!(!md.contains("TROPICAL"));
    }

    #[test]
    fn empty_inventory_renders_without_panicking() {
        let md = render_architecture_map::<&str>(&Inventory::default(), &[], "d");
        assert!(md.contains("**Total Repositories**: 0"));
    }

    fn analysed() -> RepoRecord {
        RepoRecord {
            architecture: Some(Architecture::Frontend),
            domain: Some("Web Dashboard".into()),
            purpose: Some("Metrics dashboard".into()),
            tech_stack: vec!["typescript".into(), "react".into()],
            tags: vec!["dashboard".into(), "work-project".into()],
            related: vec!["sspr-api".into()],
            ..RepoRecord::new("sspr-dashboard")
        }
    }

    #[test]
    fn analysis_block_lists_fields_tags_and_links() {
        let block = render_repo_analysis(&analysed());
        assert!(block.starts_with(ANALYSIS_BEGIN));
        assert!(block.ends_with(ANALYSIS_END));
        assert!(block.contains(
            "**Domain**: Web Dashboard\n**Architecture**: frontend\n**Purpose**: Metrics dashboard\n"
        ));
        assert!(block.contains("**Tech Stack**: typescript, react\n"));
        assert!(block.contains("**Tags**: #dashboard, #work-project\n"));
        assert!(block.contains("## Related Repositories\n\n- [[sspr-api]]\n"));
    }

    #[test]
    fn bare_record_renders_placeholders() {
        let block = render_repo_analysis(&RepoRecord::new("x"));
        assert!(block.contains("**Architecture**: unknown"));
        assert!(block.contains("**Purpose**: N/A"));
        assert!(!block.contains("Tech Stack"));
        assert!(!block.contains("Related Repositories"));
    }

    #[test]
    fn new_note_has_title_nav_and_block() {
        let note = merge_repo_note(None, &analysed());
        assert!(note.starts_with(&format!("# sspr-dashboard\n\n{HUB_NAV}\n\n{ANALYSIS_BEGIN}")));
    }

    #[test]
    fn existing_note_keeps_hand_written_text() {
        let existing = "---\ntags: [repo]\n---\n# sspr-dashboard\nStars: 3\n\n## Recent Commits\n- fix\n";
        let merged = merge_repo_note(Some(existing), &analysed());
        assert!(merged.starts_with(&format!("---\ntags: [repo]\n---\n# sspr-dashboard\n\n{HUB_NAV}\n\nStars: 3\n")));
        let block = merged.find(ANALYSIS_BEGIN).unwrap();
        let commits = merged.find("## Recent Commits").unwrap();
        assert!(block < commits);
        assert!(merged.ends_with("## Recent Commits\n- fix\n"));
        assert_eq!(merge_repo_note(Some(&merged), &analysed()), merged);
    }

    #[test]
    fn rerun_replaces_previous_block() {
        let first = merge_repo_note(Some("# n\n\nbody\n"), &RepoRecord::new("n"));
        let mut rec = RepoRecord::new("n");
        rec.related = vec!["m".into()];
        let second = merge_repo_note(Some(&first), &rec);
        assert_eq!(second.matches(ANALYSIS_BEGIN).count(), 1);
        assert!(second.contains("- [[m]]"));
        assert_eq!(second.matches(HUB_NAV).count(), 1);
        assert!(second.ends_with(&format!("{ANALYSIS_END}\n")));
    }
}
