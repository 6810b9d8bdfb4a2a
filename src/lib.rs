//! # Repo Trends
//!
//! A static site generator for trending GitHub repositories. One run fetches
//! the most-starred recent repositories, groups them by language, and writes a
//! cross-linked site: a home page, a language index, one listing per language,
//! one detail page per repository, and a `sitemap.xml`.
//!
//! # Architecture: One-Shot Pipeline
//!
//! ```text
//! 1. Source     GitHub search API (or embedded fallback)  →  raw records
//! 2. Normalize  raw records  →  validated records with slugs and display language
//! 3. Catalog    records  →  language groups, rankings, totals
//! 4. Pages      catalog  →  page contexts  →  HTML (maud)
//! 5. Sitemap    the same page list  →  sitemap.xml
//! 6. Write      manifest (path → content)  →  dist/
//! ```
//!
//! Only stage 1 touches the network and only stage 6 touches the filesystem.
//! Everything in between is a pure function of the records, the config, and
//! the run date, so two runs over the same input produce byte-identical sites.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Record sources: GitHub search, embedded fallback, offline |
//! | [`types`] | Raw and normalized record types |
//! | [`slug`] | URL-safe identifiers for page names |
//! | [`normalize`] | Validation, derived fields, language color/icon/blurb tables, number formatting |
//! | [`catalog`] | Language grouping, star ranking, similar-repository selection |
//! | [`pages`] | Page addresses, relative links, and per-page contexts |
//! | [`render`] | Maud components and page renderers |
//! | [`sitemap`] | `sitemap.xml` entries and XML |
//! | [`generate`] | Assembles the manifest and writes it to disk |
//! | [`config`] | Layered `config.toml` loading, validation, and CSS color generation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fallback Instead of Failure
//!
//! The network fetch is a single all-or-nothing attempt. Any failure (timeout,
//! HTTP status, bad JSON) substitutes the embedded 25-record dataset and the
//! run continues; the console says which data was used.
//!
//! ## Bad Records Stop the Run
//!
//! A record without an id or name, a duplicate id, or two records or languages
//! that would write the same page are fatal. The alternative is a site with
//! missing pages and links into nowhere.
//!
//! ## Relative Links
//!
//! Every internal link is relative (`../repos/x.html`), so the output works
//! from any base path and straight from disk. Only the sitemap uses absolute
//! URLs, built from `site.base_url`.

pub mod catalog;
pub mod config;
pub mod generate;
pub mod normalize;
pub mod output;
pub mod pages;
pub mod render;
pub mod sitemap;
pub mod slug;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
