//! Site generation.
//!
//! Takes one run's raw records and produces the complete site as an in-memory
//! [`SiteManifest`] (output path → content), then writes it to disk.
//!
//! ## Pipeline
//!
//! ```text
//! raw records → normalize → Catalog → page contexts → HTML
//!                                   ↘ sitemap entries → sitemap.xml
//! ```
//!
//! Nothing here touches the network, and nothing but [`write_site`] touches
//! the filesystem. Language and repository pages are rendered on the rayon
//! pool; the manifest is a `BTreeMap`, so output is identical whatever order
//! the workers finish in.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                  # Home: stats, language grid, trending cards
//! ├── sitemap.xml
//! ├── categories/
//! │   ├── index.html              # Every language, lexicographic
//! │   ├── python.html             # One listing per language
//! │   └── ...
//! └── repos/
//!     ├── johndoe-awesome-ai-assistant.html
//!     └── ...
//! ```

use crate::catalog::{Catalog, CatalogError};
use crate::config::SiteConfig;
use crate::normalize::normalize;
use crate::pages::{
    PageRef, build_home, build_language_index, build_language_page, build_repo_page, site_pages,
};
use crate::render::{
    Layout, render_home, render_language_index, render_language_page, render_repo_page,
};
use crate::sitemap::{self, SITEMAP_PATH};
use crate::types::RawRecord;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Two pages share the output path {path}")]
    DuplicatePath { path: String },
    #[error("Sitemap does not match generated pages (missing: {missing:?}, extra: {extra:?})")]
    SitemapMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },
}

/// Every output file of one run, keyed by site-relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteManifest {
    pub files: BTreeMap<String, String>,
}

impl SiteManifest {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// HTML page paths, excluding the sitemap.
    pub fn page_paths(&self) -> impl Iterator<Item = &str> {
        self.files
            .keys()
            .map(String::as_str)
            .filter(|p| p.ends_with(".html"))
    }
}

/// One language listing, for console output.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSummary {
    pub language: String,
    pub count: usize,
    pub path: String,
}

/// One repository detail page, for console output.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoSummary {
    pub full_name: String,
    pub path: String,
}

/// What a run generated, in page order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReport {
    pub languages: Vec<LanguageSummary>,
    pub repos: Vec<RepoSummary>,
}

impl GenerateReport {
    /// Home, language index, and one page per language and repository.
    pub fn page_count(&self) -> usize {
        2 + self.languages.len() + self.repos.len()
    }
}

#[derive(Debug, Clone)]
pub struct Site {
    pub manifest: SiteManifest,
    pub report: GenerateReport,
}

/// Build the whole site from one run's records.
///
/// Fails on malformed records and slug collisions, and if the sitemap would
/// list a different set of pages than was rendered.
pub fn build_site(
    raw: Vec<RawRecord>,
    config: &SiteConfig,
    date: NaiveDate,
) -> Result<Site, GenerateError> {
    let records = normalize(raw)?;
    let catalog = Catalog::build(&records)?;
    let layout = Layout::new(config);

    let mut files = BTreeMap::new();

    let home = build_home(&catalog, config);
    insert_page(
        &mut files,
        PageRef::Home.path(),
        render_home(&home, &layout).into_string(),
    )?;

    let index = build_language_index(&catalog);
    insert_page(
        &mut files,
        PageRef::LanguageIndex.path(),
        render_language_index(&index, &layout).into_string(),
    )?;

    let language_pages: Vec<(String, String)> = catalog
        .groups
        .par_iter()
        .map(|group| {
            let page = build_language_page(group, config);
            let html = render_language_page(&page, &layout).into_string();
            (page.meta.page.path(), html)
        })
        .collect();
    for (path, html) in language_pages {
        insert_page(&mut files, path, html)?;
    }

    let repo_pages: Vec<(String, String)> = catalog
        .records
        .par_iter()
        .map(|record| {
            let page = build_repo_page(record, &catalog, config);
            let html = render_repo_page(&page, &layout).into_string();
            (page.meta.page.path(), html)
        })
        .collect();
    for (path, html) in repo_pages {
        insert_page(&mut files, path, html)?;
    }

    let entries = sitemap::entries(&catalog, &config.site.base_url, date);
    check_sitemap_coverage(
        files.keys().map(String::as_str),
        entries.iter().map(|e| e.path.as_str()),
    )?;
    files.insert(SITEMAP_PATH.to_string(), sitemap::render_sitemap(&entries));

    let report = GenerateReport {
        languages: catalog
            .groups
            .iter()
            .map(|g| LanguageSummary {
                language: g.language.to_string(),
                count: g.count(),
                path: PageRef::Language(g.slug.to_string()).path(),
            })
            .collect(),
        repos: catalog
            .records
            .iter()
            .map(|r| RepoSummary {
                full_name: r.full_name.clone(),
                path: PageRef::Repo(r.slug.clone()).path(),
            })
            .collect(),
    };
    debug_assert_eq!(report.page_count(), site_pages(&catalog).len());

    Ok(Site {
        manifest: SiteManifest { files },
        report,
    })
}

/// Add a rendered page, refusing to replace one already at `path`.
fn insert_page(
    files: &mut BTreeMap<String, String>,
    path: String,
    html: String,
) -> Result<(), GenerateError> {
    match files.entry(path) {
        Entry::Occupied(entry) => Err(GenerateError::DuplicatePath {
            path: entry.key().clone(),
        }),
        Entry::Vacant(entry) => {
            entry.insert(html);
            Ok(())
        }
    }
}

/// The sitemap lists each rendered page exactly once.
fn check_sitemap_coverage<'a>(
    rendered: impl Iterator<Item = &'a str>,
    listed: impl Iterator<Item = &'a str>,
) -> Result<(), GenerateError> {
    let rendered: BTreeSet<&str> = rendered.collect();
    let mut seen = BTreeSet::new();
    for path in listed {
        if !seen.insert(path) {
            return Err(GenerateError::DuplicatePath {
                path: path.to_string(),
            });
        }
    }
    let listed = seen;
    if rendered == listed {
        return Ok(());
    }
    Err(GenerateError::SitemapMismatch {
        missing: rendered
            .difference(&listed)
            .map(|p| p.to_string())
            .collect(),
        extra: listed
            .difference(&rendered)
            .map(|p| p.to_string())
            .collect(),
    })
}

/// Write every manifest file under `output_dir`, creating directories as needed.
///
/// Existing files at the same paths are overwritten; nothing else in
/// `output_dir` is touched.
pub fn write_site(manifest: &SiteManifest, output_dir: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(output_dir)?;
    for (path, content) in &manifest.files {
        let target = output_dir.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
    }
    Ok(())
}
