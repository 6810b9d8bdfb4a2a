//! Record normalization and per-record derived values.
//!
//! Turns the source's [`RawRecord`]s into validated [`Record`]s and owns the
//! fixed lookup tables the pages draw from: language colors, icons, and
//! blurbs. All lookups are total; a language missing from a table gets the
//! table's default.
//!
//! ## Validation
//!
//! Normalization is where a bad record stops the run. A record without an
//! `id` or `full_name`, a `full_name` with nothing slug-able in it, a repeated
//! `id`, or two names that slug to the same page all fail with
//! [`CatalogError`]. Skipping such a record would leave dangling links and a
//! sitemap that disagrees with the generated pages.

use crate::catalog::CatalogError;
use crate::slug::slugify;
use crate::types::{RawRecord, Record};
use std::collections::{BTreeMap, HashMap};

/// Display language for records whose source had none.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Placeholder for records without a description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Color for languages missing from the color table.
pub const DEFAULT_COLOR: &str = "#8b949e";

/// Icon for languages missing from the icon table.
pub const DEFAULT_ICON: &str = "📦";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("Python", "#3572A5"),
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#2b7489"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("Ruby", "#701516"),
    ("PHP", "#4F5D95"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#A97BFF"),
    ("C#", "#178600"),
    ("Vue", "#41b883"),
    ("Dart", "#00B4AB"),
    ("Elixir", "#6e4a7e"),
    ("Clojure", "#db5855"),
    ("Zig", "#ec915c"),
    ("Haskell", "#5e5086"),
];

const LANGUAGE_ICONS: &[(&str, &str)] = &[
    ("Python", "🐍"),
    ("JavaScript", "🟨"),
    ("TypeScript", "📘"),
    ("Go", "🐹"),
    ("Rust", "🦀"),
    ("Java", "☕"),
    ("C++", "⚡"),
    ("Ruby", "💎"),
    ("PHP", "🐘"),
    ("Swift", "🐦"),
    ("Kotlin", "🎯"),
    ("Vue", "🟩"),
    ("Dart", "🎯"),
    ("Elixir", "💧"),
    ("Clojure", "🔷"),
    ("Zig", "⚡"),
    ("Haskell", "🌊"),
    ("C", "🔧"),
];

const LANGUAGE_BLURBS: &[(&str, &str)] = &[
    ("Python", "Machine learning, web frameworks, and automation tools"),
    ("JavaScript", "Frontend frameworks, Node.js tools, and web applications"),
    ("TypeScript", "Type-safe JavaScript for large-scale applications"),
    ("Go", "Cloud-native tools, microservices, and CLI applications"),
    ("Rust", "Systems programming, WebAssembly, and high-performance tools"),
    ("C++", "Game engines, system software, and performance-critical apps"),
    ("Java", "Enterprise applications, Android development, and backends"),
    ("Ruby", "Web development with Rails and developer tooling"),
    ("PHP", "Web applications, Laravel frameworks, and CMS platforms"),
    ("Swift", "iOS, macOS apps, and system programming"),
    ("Kotlin", "Android development and multiplatform applications"),
    ("Vue", "Progressive frontend framework for modern web apps"),
    ("Dart", "Flutter cross-platform mobile development"),
    ("Elixir", "Scalable real-time applications with Phoenix"),
    ("Clojure", "Functional programming on the JVM"),
    ("Zig", "Modern systems programming with C interop"),
    ("Haskell", "Purely functional programming and type safety"),
    ("C", "Operating systems, embedded systems, and low-level tools"),
];

fn lookup(table: &'static [(&'static str, &'static str)], language: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, value)| *value)
}

/// Normalized language label: the source value, or `"Unknown"` when absent or blank.
pub fn display_language(language: Option<&str>) -> &str {
    match language.map(str::trim) {
        Some(lang) if !lang.is_empty() => lang,
        _ => UNKNOWN_LANGUAGE,
    }
}

/// GitHub-style color for a language.
pub fn language_color(language: &str) -> &'static str {
    lookup(LANGUAGE_COLORS, language).unwrap_or(DEFAULT_COLOR)
}

/// Emoji icon shown next to a language name.
pub fn language_icon(language: &str) -> &'static str {
    lookup(LANGUAGE_ICONS, language).unwrap_or(DEFAULT_ICON)
}

/// One-line description of what a language's projects tend to be.
pub fn language_blurb(language: &str) -> String {
    lookup(LANGUAGE_BLURBS, language)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Popular {language} projects"))
}

/// Compact count for display: `950`, `12.5k`, `1.3m`.
///
/// One decimal, rounded half-up. Integer arithmetic keeps the output
/// independent of float formatting.
pub fn format_count(n: u64) -> String {
    match n {
        0..1_000 => n.to_string(),
        1_000..1_000_000 => with_one_decimal(n, 1_000, "k"),
        _ => with_one_decimal(n, 1_000_000, "m"),
    }
}

fn with_one_decimal(n: u64, unit: u64, suffix: &str) -> String {
    let tenths = (u128::from(n) * 10 + u128::from(unit) / 2) / u128::from(unit);
    format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
}

/// Validate raw records and attach derived fields, preserving source order.
pub fn normalize(raw: Vec<RawRecord>) -> Result<Vec<Record>, CatalogError> {
    let mut seen_ids: HashMap<u64, usize> = HashMap::new();
    let mut seen_slugs: HashMap<String, String> = HashMap::new();
    let mut records = Vec::with_capacity(raw.len());

    for (position, item) in raw.into_iter().enumerate() {
        let id = item
            .id
            .ok_or_else(|| CatalogError::malformed(position, "missing id"))?;
        let full_name = match item.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(CatalogError::malformed(position, "missing full_name")),
        };
        if let Some(first) = seen_ids.insert(id, position) {
            return Err(CatalogError::malformed(
                position,
                format!("duplicate id {id} (first seen at position {first})"),
            ));
        }

        let slug = slugify(&full_name);
        if slug.is_empty() {
            return Err(CatalogError::malformed(
                position,
                format!("full_name '{full_name}' has no characters usable in a page name"),
            ));
        }
        if let Some(first) = seen_slugs.get(&slug) {
            return Err(CatalogError::SlugCollision {
                slug,
                first: first.clone(),
                second: full_name,
            });
        }
        seen_slugs.insert(slug.clone(), full_name.clone());

        let language = display_language(item.language.as_deref()).to_string();
        let language_slug = slugify(&language);
        let name = if item.name.trim().is_empty() {
            full_name
                .rsplit('/')
                .next()
                .unwrap_or(&full_name)
                .to_string()
        } else {
            item.name
        };
        let description = item.description.filter(|d| !d.trim().is_empty());

        records.push(Record {
            position,
            id,
            full_name,
            name,
            description,
            owner: item.owner,
            html_url: item.html_url,
            stars: item.stargazers_count,
            forks: item.forks_count,
            open_issues: item.open_issues_count,
            language,
            topics: item.topics,
            created_at: item.created_at,
            updated_at: item.updated_at,
            slug,
            language_slug,
        });
    }

    Ok(records)
}

/// Record counts per display language.
///
/// Backed by a `BTreeMap`, so iteration is lexicographic by language name
/// regardless of the order records arrived in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageStats {
    counts: BTreeMap<String, usize>,
}

impl LanguageStats {
    pub fn from_records(records: &[Record]) -> Self {
        let mut counts = BTreeMap::new();
        for record in records {
            *counts.entry(record.language.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, language: &str) -> usize {
        self.counts.get(language).copied().unwrap_or(0)
    }

    /// Number of distinct display languages.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct languages, lexicographic.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// `(language, count)` pairs, most records first, ties by name.
    pub fn by_popularity(&self) -> Vec<(&str, usize)> {
        let mut pairs: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(lang, count)| (lang.as_str(), *count))
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::raw;

    #[test]
    fn format_count_examples() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(12_500), "12.5k");
        assert_eq!(format_count(1_250_000), "1.3m");
    }

    #[test]
    fn format_count_boundaries() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0k");
        assert_eq!(format_count(999_999), "1000.0k");
        assert_eq!(format_count(1_000_000), "1.0m");
    }

    #[test]
    fn format_count_rounds_half_up() {
        assert_eq!(format_count(1_050), "1.1k");
        assert_eq!(format_count(1_049), "1.0k");
        assert_eq!(format_count(2_450_000), "2.5m");
    }

    #[test]
    fn format_count_handles_u64_max() {
        assert!(format_count(u64::MAX).ends_with('m'));
    }

    #[test]
    fn display_language_falls_back_to_unknown() {
        assert_eq!(display_language(Some("Rust")), "Rust");
        assert_eq!(display_language(None), "Unknown");
        assert_eq!(display_language(Some("")), "Unknown");
        assert_eq!(display_language(Some("   ")), "Unknown");
    }

    #[test]
    fn tables_have_defaults() {
        assert_eq!(language_color("Python"), "#3572A5");
        assert_eq!(language_color("COBOL"), DEFAULT_COLOR);
        assert_eq!(language_icon("Rust"), "🦀");
        assert_eq!(language_icon("COBOL"), DEFAULT_ICON);
        assert_eq!(
            language_blurb("Zig"),
            "Modern systems programming with C interop"
        );
        assert_eq!(language_blurb("COBOL"), "Popular COBOL projects");
    }

    #[test]
    fn normalize_derives_fields() {
        let mut item = raw(1, "Owner/My.Repo", Some("Rust"), 10);
        item.created_at = "2025-01-15T10:00:00Z".to_string();
        let records = normalize(vec![item]).unwrap();
        let record = &records[0];
        assert_eq!(record.slug, "owner-my-repo");
        assert_eq!(record.language, "Rust");
        assert_eq!(record.language_slug, "rust");
        assert_eq!(record.created_date(), "2025-01-15");
        assert_eq!(record.position, 0);
    }

    #[test]
    fn normalize_maps_missing_language_to_unknown() {
        let records = normalize(vec![raw(1, "a/b", None, 1)]).unwrap();
        assert_eq!(records[0].language, "Unknown");
        assert_eq!(records[0].language_slug, "unknown");
    }

    #[test]
    fn normalize_drops_blank_description() {
        let mut item = raw(1, "a/b", None, 1);
        item.description = Some("  ".to_string());
        let records = normalize(vec![item]).unwrap();
        assert_eq!(records[0].description, None);
    }

    #[test]
    fn normalize_fills_name_from_full_name() {
        let mut item = raw(1, "someone/thing", None, 1);
        item.name = String::new();
        let records = normalize(vec![item]).unwrap();
        assert_eq!(records[0].name, "thing");
    }

    #[test]
    fn missing_id_is_malformed_with_position() {
        let mut bad = raw(2, "a/c", None, 1);
        bad.id = None;
        let err = normalize(vec![raw(1, "a/b", None, 1), bad]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { position: 1, .. }));
    }

    #[test]
    fn missing_full_name_is_malformed() {
        let mut bad = raw(1, "a/b", None, 1);
        bad.full_name = None;
        let err = normalize(vec![bad]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { position: 0, .. }));
    }

    #[test]
    fn unsluggable_full_name_is_malformed() {
        let err = normalize(vec![raw(1, "///", None, 1)]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { position: 0, .. }));
    }

    #[test]
    fn duplicate_id_is_malformed() {
        let err = normalize(vec![raw(1, "a/b", None, 1), raw(1, "a/c", None, 1)]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { position: 1, .. }));
    }

    #[test]
    fn colliding_full_names_are_rejected() {
        let err =
            normalize(vec![raw(1, "a/b-c", None, 1), raw(2, "a-b/c", None, 1)]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::SlugCollision {
                slug: "a-b-c".to_string(),
                first: "a/b-c".to_string(),
                second: "a-b/c".to_string(),
            }
        );
    }

    #[test]
    fn language_stats_counts_and_orders() {
        let records = normalize(vec![
            raw(1, "a/1", Some("Rust"), 1),
            raw(2, "a/2", Some("Go"), 1),
            raw(3, "a/3", Some("Rust"), 1),
            raw(4, "a/4", None, 1),
        ])
        .unwrap();
        let stats = LanguageStats::from_records(&records);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.count("Rust"), 2);
        assert_eq!(stats.count("Python"), 0);
        assert_eq!(
            stats.languages().collect::<Vec<_>>(),
            vec!["Go", "Rust", "Unknown"]
        );
        assert_eq!(
            stats.by_popularity(),
            vec![("Rust", 2), ("Go", 1), ("Unknown", 1)]
        );
    }

    #[test]
    fn language_stats_empty() {
        let stats = LanguageStats::from_records(&[]);
        assert!(stats.is_empty());
        assert!(stats.by_popularity().is_empty());
    }
}
