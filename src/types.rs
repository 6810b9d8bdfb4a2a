//! Record types shared across pipeline stages.
//!
//! [`RawRecord`] is what a record source hands over: the GitHub search API
//! item shape, with identity fields optional so malformed input can be
//! reported instead of failing deserialization wholesale. [`Record`] is the
//! normalized form every later stage works with.

use serde::{Deserialize, Serialize};

/// Repository owner as reported by the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

/// One repository item exactly as the source delivered it.
///
/// Unknown fields are ignored: the live API sends far more than we use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: Option<u64>,
    pub full_name: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub owner: Owner,
}

/// A validated repository record with its derived fields.
///
/// Produced once per run by [`crate::normalize::normalize`] and never mutated
/// afterwards; pages borrow from the normalized slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Zero-based position in the source order.
    pub position: usize,
    pub id: u64,
    pub full_name: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: Owner,
    pub html_url: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// Display language, never empty (`"Unknown"` when the source had none).
    pub language: String,
    pub topics: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Slug of `full_name`, unique within the run.
    pub slug: String,
    /// Slug of the display language.
    pub language_slug: String,
}

impl Record {
    /// Creation date (`YYYY-MM-DD`), the timestamp's date component.
    pub fn created_date(&self) -> &str {
        date_part(&self.created_at)
    }

    /// Last update date (`YYYY-MM-DD`).
    pub fn updated_date(&self) -> &str {
        date_part(&self.updated_at)
    }
}

fn date_part(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}
