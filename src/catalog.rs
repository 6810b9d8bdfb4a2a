//! Grouping and ranking.
//!
//! A [`Catalog`] is the read-only view every page is assembled from: the
//! normalized records in source order, one [`LanguageGroup`] per display
//! language (lexicographic), and the language counts.
//!
//! ## Ranking
//!
//! "Popular" always means `stars` descending with a stable sort, so records
//! with equal stars keep their source order. Identical input therefore yields
//! identical pages, run after run. The one place that does *not* rank is
//! [`top_n_overall`]: the home page mirrors the source order.

use crate::normalize::LanguageStats;
use crate::types::Record;
use std::cmp::Reverse;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Malformed record at position {position}: {reason}")]
    MalformedRecord { position: usize, reason: String },
    #[error("Slug collision: '{first}' and '{second}' both map to '{slug}'")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },
}

impl CatalogError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            position,
            reason: reason.into(),
        }
    }
}

/// Language slugs taken by other pages under `categories/`.
pub const RESERVED_LANGUAGE_SLUGS: &[&str] = &["index"];

/// All records sharing one display language, most-starred first.
#[derive(Debug, Clone)]
pub struct LanguageGroup<'a> {
    pub language: &'a str,
    pub slug: &'a str,
    pub members: Vec<&'a Record>,
}

impl<'a> LanguageGroup<'a> {
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// The most-starred member; the earliest in source order on ties.
    pub fn top(&self) -> Option<&'a Record> {
        self.members.first().copied()
    }
}

/// Sort by stars descending, keeping source order among equals.
pub fn rank_by_stars<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<&'a Record> {
    let mut ranked: Vec<&Record> = records.into_iter().collect();
    ranked.sort_by_key(|r| Reverse(r.stars));
    ranked
}

/// Partition records by display language.
///
/// Groups come back in lexicographic language order. Two distinct languages
/// whose slugs coincide (`C` and `C++`) would write the same page, so that is
/// a [`CatalogError::SlugCollision`], as is a language slugging to one of
/// [`RESERVED_LANGUAGE_SLUGS`]. A language with no slug-able characters is
/// reported against the first record carrying it.
pub fn group_by_language(records: &[Record]) -> Result<Vec<LanguageGroup<'_>>, CatalogError> {
    let mut by_language: HashMap<&str, Vec<&Record>> = HashMap::new();
    for record in records {
        by_language
            .entry(record.language.as_str())
            .or_default()
            .push(record);
    }

    let mut groups: Vec<LanguageGroup> = by_language
        .into_iter()
        .map(|(language, members)| {
            let first: &Record = members[0];
            LanguageGroup {
                language,
                slug: first.language_slug.as_str(),
                members: rank_by_stars(members),
            }
        })
        .collect();
    groups.sort_by(|a, b| a.language.cmp(b.language));

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for group in &groups {
        if group.slug.is_empty() {
            let position = group
                .members
                .iter()
                .map(|r| r.position)
                .min()
                .unwrap_or_default();
            return Err(CatalogError::malformed(
                position,
                format!(
                    "language '{}' has no characters usable in a page name",
                    group.language
                ),
            ));
        }
        if RESERVED_LANGUAGE_SLUGS.iter().any(|r| *r == group.slug) {
            return Err(CatalogError::SlugCollision {
                slug: group.slug.to_string(),
                first: "language index".to_string(),
                second: group.language.to_string(),
            });
        }
        if let Some(first) = seen.insert(group.slug, group.language) {
            return Err(CatalogError::SlugCollision {
                slug: group.slug.to_string(),
                first: first.to_string(),
                second: group.language.to_string(),
            });
        }
    }

    Ok(groups)
}

/// Records in `record`'s language other than `record` itself, ranked, at most `limit`.
pub fn similar<'a>(record: &Record, all: &'a [Record], limit: usize) -> Vec<&'a Record> {
    let mut ranked = rank_by_stars(
        all.iter()
            .filter(|r| r.language == record.language && r.id != record.id),
    );
    ranked.truncate(limit);
    ranked
}

/// The first `n` records in source order.
pub fn top_n_overall(records: &[Record], n: usize) -> &[Record] {
    &records[..n.min(records.len())]
}

/// The grouped, ranked view of one run's records.
#[derive(Debug)]
pub struct Catalog<'a> {
    pub records: &'a [Record],
    pub groups: Vec<LanguageGroup<'a>>,
    pub stats: LanguageStats,
}

impl<'a> Catalog<'a> {
    pub fn build(records: &'a [Record]) -> Result<Self, CatalogError> {
        Ok(Self {
            records,
            groups: group_by_language(records)?,
            stats: LanguageStats::from_records(records),
        })
    }

    pub fn group(&self, language: &str) -> Option<&LanguageGroup<'a>> {
        self.groups
            .binary_search_by(|g| g.language.cmp(language))
            .ok()
            .map(|idx| &self.groups[idx])
    }

    pub fn total_stars(&self) -> u64 {
        self.records.iter().map(|r| r.stars).sum()
    }

    pub fn total_forks(&self) -> u64 {
        self.records.iter().map(|r| r.forks).sum()
    }
}
