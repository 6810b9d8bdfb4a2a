//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is an inventory of what the site contains, not a log of file
//! writes. Every page leads with what it shows (a language and its record
//! count, a repository's full name) followed by `→` and its output path.
//!
//! # Output Format
//!
//! ## Source
//!
//! ```text
//! Fetched 50 repositories from api.github.com
//! ```
//!
//! or, when the source failed:
//!
//! ```text
//! Source unavailable: API returned HTTP 403
//! Using fallback dataset (25 repositories)
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Languages → categories/index.html
//!     001 C++ (1 repo) → categories/c.html
//!     002 Clojure (1 repo) → categories/clojure.html
//! Repositories
//!     001 johndoe/awesome-ai-assistant → repos/johndoe-awesome-ai-assistant.html
//! Sitemap → sitemap.xml
//!
//! Generated 43 pages (1 home, 1 language index, 16 languages, 25 repositories)
//! ```
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::sitemap::SITEMAP_PATH;
use crate::source::SourceOutcome;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    match count {
        1 => format!("1 {singular}"),
        n => format!("{n} {plural}"),
    }
}

// ============================================================================
// Source
// ============================================================================

pub fn format_source_outcome(outcome: &SourceOutcome) -> Vec<String> {
    match outcome {
        SourceOutcome::Live { origin, count } => vec![format!(
            "Fetched {} from {}",
            plural(*count, "repository", "repositories"),
            origin
        )],
        SourceOutcome::Fallback { reason, count } => vec![
            format!("Source unavailable: {reason}"),
            format!(
                "Using fallback dataset ({})",
                plural(*count, "repository", "repositories")
            ),
        ],
    }
}

pub fn print_source_outcome(outcome: &SourceOutcome) {
    for line in format_source_outcome(outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format the generated page inventory and summary line.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Home \u{2192} index.html".to_string());
    lines.push("Languages \u{2192} categories/index.html".to_string());
    for (i, language) in report.languages.iter().enumerate() {
        lines.push(format!(
            "{}{} {} ({}) \u{2192} {}",
            indent(1),
            format_index(i + 1),
            language.language,
            plural(language.count, "repo", "repos"),
            language.path
        ));
    }

    if !report.repos.is_empty() {
        lines.push("Repositories".to_string());
        for (i, repo) in report.repos.iter().enumerate() {
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(i + 1),
                repo.full_name,
                repo.path
            ));
        }
    }
    lines.push(format!("Sitemap \u{2192} {}", SITEMAP_PATH));

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages (1 home, 1 language index, {} languages, {} repositories)",
        report.page_count(),
        report.languages.len(),
        report.repos.len()
    ));

    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

pub fn format_written(file_count: usize, output_dir: &Path) -> String {
    format!("Wrote {} files to {}", file_count, output_dir.display())
}

// ============================================================================
// Tests
// ============================================================================
