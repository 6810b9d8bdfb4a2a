//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; the user's file is merged on top, and command-line
//! overrides (such as `--base-url`) are merged on top of that.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "GitHub Trends"
//! tagline = "Discover the most exciting open source projects trending on GitHub right now"
//! base_url = "https://yourusername.github.io/github-trends"
//!
//! [source]
//! enabled = true
//! api_base = "https://api.github.com"
//! per_page = 50             # 1-100
//! window_days = 30          # Only repositories created in the last N days
//! timeout_secs = 30
//! user_agent = "GitHub-Trends-Analyzer"
//!
//! [pages]
//! home_top_n = 20           # Cards in the home page "Trending Now" grid
//! similar_limit = 4         # Cards in a repository's "Similar" section
//! card_topics = 4           # Topics shown per card (detail pages show all)
//!
//! [colors]
//! bg_primary = "#0d1117"
//! bg_secondary = "#161b22"
//! bg_tertiary = "#21262d"
//! border = "#30363d"
//! text_primary = "#f0f6fc"
//! text_secondary = "#8b949e"
//! accent = "#58a6ff"
//! accent_hover = "#79c0ff"
//! success = "#3fb950"
//! warning = "#d29922"
//!
//! [processing]
//! max_processes = 4         # Max parallel page renderers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and canonical address.
    pub site: SiteSection,
    /// Where records come from.
    pub source: SourceConfig,
    /// Page composition limits.
    pub pages: PagesConfig,
    /// Palette, emitted as CSS custom properties.
    pub colors: ColorScheme,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.site.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".into(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if !(1..=100).contains(&self.source.per_page) {
            return Err(ConfigError::Validation(
                "source.per_page must be 1-100".into(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "source.timeout_secs must be non-zero".into(),
            ));
        }
        if self.pages.home_top_n == 0 {
            return Err(ConfigError::Validation(
                "pages.home_top_n must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Shown in the header, the home hero, and every `<title>`.
    pub title: String,
    /// Home page hero subtitle.
    pub tagline: String,
    /// Absolute URL the site is published under; sitemap locations start here.
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "GitHub Trends".to_string(),
            tagline: "Discover the most exciting open source projects trending on GitHub right now"
                .to_string(),
            base_url: "https://yourusername.github.io/github-trends".to_string(),
        }
    }
}

/// GitHub search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// When false, never touch the network and build from the fallback dataset.
    pub enabled: bool,
    pub api_base: String,
    /// Results requested per search (the API caps this at 100).
    pub per_page: u32,
    /// Only repositories created within this many days of the build date.
    pub window_days: u64,
    /// Whole-request timeout. Exceeding it falls back to the embedded dataset.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: "https://api.github.com".to_string(),
            per_page: 50,
            window_days: 30,
            timeout_secs: 30,
            user_agent: "GitHub-Trends-Analyzer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    /// Cards on the home page, taken from the front of the source order.
    pub home_top_n: usize,
    /// Cards in a repository page's similar section.
    pub similar_limit: usize,
    /// Topics shown on a card.
    pub card_topics: usize,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            home_top_n: 20,
            similar_limit: 4,
            card_topics: 4,
        }
    }
}

/// Site palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub bg_primary: String,
    /// Header, cards, and panels.
    pub bg_secondary: String,
    /// Topic chips and hover states.
    pub bg_tertiary: String,
    pub border: String,
    pub text_primary: String,
    /// Descriptions, labels, breadcrumbs.
    pub text_secondary: String,
    pub accent: String,
    pub accent_hover: String,
    pub success: String,
    /// Star counts.
    pub warning: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            bg_primary: "#0d1117".to_string(),
            bg_secondary: "#161b22".to_string(),
            bg_tertiary: "#21262d".to_string(),
            border: "#30363d".to_string(),
            text_primary: "#f0f6fc".to_string(),
            text_secondary: "#8b949e".to_string(),
            accent: "#58a6ff".to_string(),
            accent_hover: "#79c0ff".to_string(),
            success: "#3fb950".to_string(),
            warning: "#d29922".to_string(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page renderers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays in order onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `path` (if present) over stock defaults, then apply `overrides`.
pub fn load_config(path: &Path, overrides: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let file = load_raw_config(path)?;
    resolve_config(base, file.into_iter().chain(overrides))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# repo-trends Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Shown in the header, the home page hero, and every page title.
title = "GitHub Trends"
# Home page subtitle.
tagline = "Discover the most exciting open source projects trending on GitHub right now"
# Absolute URL the site is published under. Sitemap entries start with it.
base_url = "https://yourusername.github.io/github-trends"

# ---------------------------------------------------------------------------
# Record source (GitHub search API)
# ---------------------------------------------------------------------------
[source]
# Set to false to always build from the embedded fallback dataset.
enabled = true
api_base = "https://api.github.com"
# Results per search, 1-100.
per_page = 50
# Only repositories created within this many days.
window_days = 30
# Whole-request timeout in seconds. On timeout the fallback dataset is used.
timeout_secs = 30
user_agent = "GitHub-Trends-Analyzer"

# ---------------------------------------------------------------------------
# Page composition
# ---------------------------------------------------------------------------
[pages]
# Repository cards on the home page (source order, not re-ranked).
home_top_n = 20
# Cards in each repository page's "Similar Repositories" section.
similar_limit = 4
# Topics shown per card. Repository pages always show every topic.
card_topics = 4

# ---------------------------------------------------------------------------
# Colors (emitted as CSS custom properties)
# ---------------------------------------------------------------------------
[colors]
bg_primary = "#0d1117"
bg_secondary = "#161b22"
bg_tertiary = "#21262d"
border = "#30363d"
text_primary = "#f0f6fc"
text_secondary = "#8b949e"   # Descriptions, labels, breadcrumbs
accent = "#58a6ff"
accent_hover = "#79c0ff"
success = "#3fb950"
warning = "#d29922"          # Star counts

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page renderers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from the color config.
pub fn generate_color_css(colors: &ColorScheme) -> String {
    format!(
        r#":root {{
    --bg-primary: {bg_primary};
    --bg-secondary: {bg_secondary};
    --bg-tertiary: {bg_tertiary};
    --border: {border};
    --text-primary: {text_primary};
    --text-secondary: {text_secondary};
    --accent: {accent};
    --accent-hover: {accent_hover};
    --success: {success};
    --warning: {warning};
}}"#,
        bg_primary = colors.bg_primary,
        bg_secondary = colors.bg_secondary,
        bg_tertiary = colors.bg_tertiary,
        border = colors.border,
        text_primary = colors.text_primary,
        text_secondary = colors.text_secondary,
        accent = colors.accent,
        accent_hover = colors.accent_hover,
        success = colors.success,
        warning = colors.warning,
    )
}
