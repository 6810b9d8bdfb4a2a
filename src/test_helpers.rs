//! Shared test utilities for the repo-trends test suite.
//!
//! Provides a compact record constructor, the normalized fallback dataset,
//! and lookups that panic with the available names on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let records = fallback_records();
//! let fastapi = find_record(&records, "pythonista/fastapi-starter-template");
//! assert_eq!(fastapi.language, "Python");
//!
//! let records = normalize(vec![raw(1, "a/b", Some("Rust"), 10)]).unwrap();
//! ```

use crate::normalize::normalize;
use crate::source::{FallbackSource, RecordSource};
use crate::types::{Owner, RawRecord, Record};

// =========================================================================
// Record construction
// =========================================================================

/// A well-formed raw record with the given identity, language, and stars.
///
/// `name`, `owner`, and `html_url` are derived from `full_name`; dates are a
/// fixed day in January 2025.
pub fn raw(id: u64, full_name: &str, language: Option<&str>, stars: u64) -> RawRecord {
    let (owner, name) = full_name.split_once('/').unwrap_or(("", full_name));
    RawRecord {
        id: Some(id),
        full_name: Some(full_name.to_string()),
        name: name.to_string(),
        description: Some(format!("Description of {full_name}")),
        html_url: format!("https://github.com/{full_name}"),
        stargazers_count: stars,
        forks_count: stars / 10,
        open_issues_count: 1,
        language: language.map(str::to_string),
        topics: vec!["topic".to_string()],
        created_at: "2025-01-10T00:00:00Z".to_string(),
        updated_at: "2025-01-20T00:00:00Z".to_string(),
        owner: Owner {
            login: owner.to_string(),
            avatar_url: format!("https://avatars.example.com/{owner}"),
        },
    }
}

/// The embedded fallback dataset, normalized.
pub fn fallback_records() -> Vec<Record> {
    normalize(FallbackSource.fetch().unwrap()).unwrap()
}

// =========================================================================
// Lookups: panic with the available names on a miss
// =========================================================================

/// Find a record by `full_name`. Panics if not found.
pub fn find_record<'a>(records: &'a [Record], full_name: &str) -> &'a Record {
    records
        .iter()
        .find(|r| r.full_name == full_name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = records.iter().map(|r| r.full_name.as_str()).collect();
            panic!("record '{full_name}' not found. Available: {names:?}")
        })
}

