//! Record sources: the live GitHub search API and the embedded fallback.
//!
//! A source either returns the complete record list or fails. There is no
//! retry and no merging of partial results: [`fetch_or_fallback`] makes one
//! attempt and, on any failure, substitutes the embedded dataset so the run
//! still produces a full site.
//!
//! ## Fallback Dataset
//!
//! `data/fallback.json` is compiled into the binary. It holds 25 records
//! spanning 16 languages and is what offline and demo builds render, so its
//! contents are part of the reproducible output.

use crate::config::SourceConfig;
use crate::types::RawRecord;
use chrono::{Days, NaiveDate};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const FALLBACK_JSON: &str = include_str!("../data/fallback.json");

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned HTTP {0}")]
    Status(u16),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("network access disabled")]
    Offline,
}

/// Anything that can hand over the run's records in one call.
pub trait RecordSource {
    /// Short human-readable origin, used in console output.
    fn origin(&self) -> String;

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError>;
}

/// How the run's records were obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Live { origin: String, count: usize },
    Fallback { reason: String, count: usize },
}

/// Try `source` once; on failure use the embedded fallback dataset.
///
/// Only a broken embedded dataset is an error here; a failing `source` never is.
pub fn fetch_or_fallback(
    source: &dyn RecordSource,
) -> Result<(Vec<RawRecord>, SourceOutcome), SourceError> {
    match source.fetch() {
        Ok(records) => {
            let outcome = SourceOutcome::Live {
                origin: source.origin(),
                count: records.len(),
            };
            Ok((records, outcome))
        }
        Err(err) => {
            let records = FallbackSource.fetch()?;
            let outcome = SourceOutcome::Fallback {
                reason: err.to_string(),
                count: records.len(),
            };
            Ok((records, outcome))
        }
    }
}

/// The embedded demo dataset.
pub struct FallbackSource;

impl RecordSource for FallbackSource {
    fn origin(&self) -> String {
        "fallback dataset".to_string()
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        Ok(serde_json::from_str(FALLBACK_JSON)?)
    }
}

/// Stand-in for `--offline`: always unavailable.
pub struct Offline;

impl RecordSource for Offline {
    fn origin(&self) -> String {
        "offline".to_string()
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        Err(SourceError::Offline)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RawRecord>,
}

/// Repositories created within the configured window, most-starred first.
pub struct GithubSource {
    config: SourceConfig,
    created_after: NaiveDate,
}

impl GithubSource {
    pub fn new(config: &SourceConfig, today: NaiveDate) -> Self {
        let created_after = today
            .checked_sub_days(Days::new(config.window_days))
            .unwrap_or(today);
        Self {
            config: config.clone(),
            created_after,
        }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/search/repositories",
            self.config.api_base.trim_end_matches('/')
        )
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", format!("created:>{}", self.created_after.format("%Y-%m-%d"))),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", self.config.per_page.to_string()),
        ]
    }
}

impl RecordSource for GithubSource {
    fn origin(&self) -> String {
        let base = self.config.api_base.as_str();
        base.split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(base)
            .trim_end_matches('/')
            .to_string()
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .user_agent(self.config.user_agent.clone())
            .build()?;

        let response = client
            .get(self.search_url())
            .header(ACCEPT, "application/vnd.github.v3+json")
            .query(&self.query_params())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let payload: SearchResponse = response.json()?;
        Ok(payload.items)
    }
}
