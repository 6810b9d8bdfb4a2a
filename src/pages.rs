//! Page assembly: from the catalog to plain page contexts.
//!
//! Each page type has a `build_*` function returning a context struct that
//! holds everything the page shows, already formatted: titles, breadcrumbs,
//! stat values, cards with resolved hrefs. Rendering ([`crate::render`]) only
//! lays these out; it makes no decisions about data.
//!
//! ## Page Addresses
//!
//! [`PageRef`] is the single source of truth for where a page lives:
//!
//! ```text
//! Home              → index.html
//! LanguageIndex     → categories/index.html
//! Language(slug)    → categories/{slug}.html
//! Repo(slug)        → repos/{slug}.html
//! ```
//!
//! Links are relative so the site works from any base path, including a
//! `file://` preview. [`PageRef::href_from`] computes them from the linking
//! page's directory. [`site_pages`] enumerates every page once, and both the
//! manifest and the sitemap are built from it.

use crate::catalog::{Catalog, LanguageGroup, similar, top_n_overall};
use crate::config::SiteConfig;
use crate::normalize::{
    NO_DESCRIPTION, format_count, language_blurb, language_color, language_icon,
};
use crate::types::Record;
use serde::Serialize;

/// Address of one generated page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PageRef {
    Home,
    LanguageIndex,
    Language(String),
    Repo(String),
}

impl PageRef {
    fn dir(&self) -> &'static str {
        match self {
            PageRef::Home => "",
            PageRef::LanguageIndex | PageRef::Language(_) => "categories",
            PageRef::Repo(_) => "repos",
        }
    }

    fn file_name(&self) -> String {
        match self {
            PageRef::Home | PageRef::LanguageIndex => "index.html".to_string(),
            PageRef::Language(slug) | PageRef::Repo(slug) => format!("{slug}.html"),
        }
    }

    /// Output path relative to the site root.
    pub fn path(&self) -> String {
        match self.dir() {
            "" => self.file_name(),
            dir => format!("{dir}/{}", self.file_name()),
        }
    }

    /// Relative link to this page from a page at `from`.
    pub fn href_from(&self, from: &PageRef) -> String {
        if from.dir() == self.dir() {
            self.file_name()
        } else if from.dir().is_empty() {
            self.path()
        } else {
            format!("../{}", self.path())
        }
    }
}

/// Every page of the site: home, language index, each language, each record.
///
/// Languages come in the catalog's lexicographic order, records in source order.
pub fn site_pages(catalog: &Catalog) -> Vec<PageRef> {
    let mut pages = Vec::with_capacity(2 + catalog.groups.len() + catalog.records.len());
    pages.push(PageRef::Home);
    pages.push(PageRef::LanguageIndex);
    pages.extend(
        catalog
            .groups
            .iter()
            .map(|g| PageRef::Language(g.slug.to_string())),
    );
    pages.extend(
        catalog
            .records
            .iter()
            .map(|r| PageRef::Repo(r.slug.clone())),
    );
    pages
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crumb {
    pub label: String,
    /// `None` for the current page.
    pub href: Option<String>,
}

impl Crumb {
    fn link(label: impl Into<String>, target: &PageRef, from: &PageRef) -> Self {
        Self {
            label: label.into(),
            href: Some(target.href_from(from)),
        }
    }

    fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

/// Fields every page carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub page: PageRef,
    pub title: String,
    pub description: String,
    pub breadcrumbs: Vec<Crumb>,
}

/// A repository tile linking to its detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoCard {
    pub full_name: String,
    pub href: String,
    pub stars: String,
    pub forks: String,
    pub issues: String,
    pub description: String,
    pub language: String,
    pub color: &'static str,
    pub topics: Vec<String>,
}

impl RepoCard {
    fn new(record: &Record, from: &PageRef, topic_limit: usize) -> Self {
        Self {
            full_name: record.full_name.clone(),
            href: PageRef::Repo(record.slug.clone()).href_from(from),
            stars: format_count(record.stars),
            forks: format_count(record.forks),
            issues: format_count(record.open_issues),
            description: description_or_placeholder(record),
            language: record.language.clone(),
            color: language_color(&record.language),
            topics: record.topics.iter().take(topic_limit).cloned().collect(),
        }
    }
}

/// A language tile linking to its listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageTile {
    pub language: String,
    pub href: String,
    pub icon: &'static str,
    pub color: &'static str,
    pub count: usize,
    pub blurb: String,
    /// Formatted star count of the language's most-starred record.
    pub top_stars: String,
}

impl LanguageTile {
    fn new(group: &LanguageGroup, from: &PageRef) -> Self {
        Self {
            language: group.language.to_string(),
            href: PageRef::Language(group.slug.to_string()).href_from(from),
            icon: language_icon(group.language),
            color: language_color(group.language),
            count: group.count(),
            blurb: language_blurb(group.language),
            top_stars: format_count(group.top().map(|r| r.stars).unwrap_or(0)),
        }
    }
}

fn description_or_placeholder(record: &Record) -> String {
    record
        .description
        .clone()
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

// ============================================================================
// Home
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub meta: PageMeta,
    pub heading: String,
    pub tagline: String,
    pub stats: Vec<Stat>,
    /// Languages by record count, most first.
    pub languages: Vec<LanguageTile>,
    pub languages_href: String,
    /// The first `home_top_n` records in source order.
    pub trending: Vec<RepoCard>,
}

pub fn build_home(catalog: &Catalog, config: &SiteConfig) -> HomePage {
    let page = PageRef::Home;

    let stats = vec![
        Stat {
            label: "Repositories",
            value: format_count(catalog.records.len() as u64),
        },
        Stat {
            label: "Total Stars",
            value: format_count(catalog.total_stars()),
        },
        Stat {
            label: "Total Forks",
            value: format_count(catalog.total_forks()),
        },
        Stat {
            label: "Languages",
            value: format_count(catalog.stats.len() as u64),
        },
    ];

    let languages = catalog
        .stats
        .by_popularity()
        .into_iter()
        .filter_map(|(language, _)| catalog.group(language))
        .map(|group| LanguageTile::new(group, &page))
        .collect();

    let trending = top_n_overall(catalog.records, config.pages.home_top_n)
        .iter()
        .map(|r| RepoCard::new(r, &page, config.pages.card_topics))
        .collect();

    HomePage {
        meta: PageMeta {
            title: "Trending Repositories".to_string(),
            description: "Discover trending GitHub repositories across all programming languages. Updated daily with the most starred projects.".to_string(),
            breadcrumbs: Vec::new(),
            page: page.clone(),
        },
        heading: config.site.title.clone(),
        tagline: config.site.tagline.clone(),
        stats,
        languages,
        languages_href: PageRef::LanguageIndex.href_from(&page),
        trending,
    }
}

// ============================================================================
// Language index
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageIndexPage {
    pub meta: PageMeta,
    /// Every language, lexicographic.
    pub languages: Vec<LanguageTile>,
}

pub fn build_language_index(catalog: &Catalog) -> LanguageIndexPage {
    let page = PageRef::LanguageIndex;
    LanguageIndexPage {
        meta: PageMeta {
            title: "Browse by Language".to_string(),
            description: "Explore trending GitHub repositories by programming language. Find the best projects in Python, TypeScript, Rust, Go, and more.".to_string(),
            breadcrumbs: vec![
                Crumb::link("Home", &PageRef::Home, &page),
                Crumb::current("Languages"),
            ],
            page: page.clone(),
        },
        languages: catalog
            .groups
            .iter()
            .map(|g| LanguageTile::new(g, &page))
            .collect(),
    }
}

// ============================================================================
// Per-language listing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguagePage {
    pub meta: PageMeta,
    pub language: String,
    pub color: &'static str,
    pub count: usize,
    /// All members, most-starred first.
    pub repos: Vec<RepoCard>,
}

pub fn build_language_page(group: &LanguageGroup, config: &SiteConfig) -> LanguagePage {
    let page = PageRef::Language(group.slug.to_string());
    let count = group.count();
    LanguagePage {
        meta: PageMeta {
            title: format!("Top {} Repositories", group.language),
            description: format!(
                "Discover the most popular {} repositories on GitHub. Browse {} trending projects.",
                group.language,
                format_count(count as u64)
            ),
            breadcrumbs: vec![
                Crumb::link("Home", &PageRef::Home, &page),
                Crumb::link("Languages", &PageRef::LanguageIndex, &page),
                Crumb::current(group.language),
            ],
            page: page.clone(),
        },
        language: group.language.to_string(),
        color: language_color(group.language),
        count,
        repos: group
            .members
            .iter()
            .map(|r| RepoCard::new(r, &page, config.pages.card_topics))
            .collect(),
    }
}

// ============================================================================
// Repository detail
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoPage {
    pub meta: PageMeta,
    pub full_name: String,
    pub description: String,
    pub owner_login: String,
    pub avatar_url: String,
    pub created: String,
    pub updated: String,
    /// Every topic, in source order.
    pub topics: Vec<String>,
    /// Stars, forks, open issues, language.
    pub stats: Vec<Stat>,
    pub language: String,
    pub color: &'static str,
    pub html_url: String,
    /// Empty when the record is alone in its language; the section is then omitted.
    pub similar: Vec<RepoCard>,
}

pub fn build_repo_page(record: &Record, catalog: &Catalog, config: &SiteConfig) -> RepoPage {
    let page = PageRef::Repo(record.slug.clone());
    let language_page = PageRef::Language(record.language_slug.clone());
    let stars = format_count(record.stars);

    let description = match &record.description {
        Some(desc) => format!(
            "{desc} • {stars} stars • {} • GitHub repository details",
            record.language
        ),
        None => format!(
            "{} • {stars} stars • {} • GitHub repository details",
            record.full_name, record.language
        ),
    };

    RepoPage {
        meta: PageMeta {
            title: record.full_name.clone(),
            description,
            breadcrumbs: vec![
                Crumb::link("Home", &PageRef::Home, &page),
                Crumb::link(record.language.clone(), &language_page, &page),
                Crumb::current(record.name.clone()),
            ],
            page: page.clone(),
        },
        full_name: record.full_name.clone(),
        description: description_or_placeholder(record),
        owner_login: record.owner.login.clone(),
        avatar_url: record.owner.avatar_url.clone(),
        created: record.created_date().to_string(),
        updated: record.updated_date().to_string(),
        topics: record.topics.clone(),
        stats: vec![
            Stat {
                label: "Stars",
                value: stars,
            },
            Stat {
                label: "Forks",
                value: format_count(record.forks),
            },
            Stat {
                label: "Open Issues",
                value: format_count(record.open_issues),
            },
            Stat {
                label: "Language",
                value: record.language.clone(),
            },
        ],
        language: record.language.clone(),
        color: language_color(&record.language),
        html_url: record.html_url.clone(),
        similar: similar(record, catalog.records, config.pages.similar_limit)
            .into_iter()
            .map(|r| RepoCard::new(r, &page, config.pages.card_topics))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::test_helpers::{fallback_records, find_record, raw};

    #[test]
    fn page_paths() {
        assert_eq!(PageRef::Home.path(), "index.html");
        assert_eq!(PageRef::LanguageIndex.path(), "categories/index.html");
        assert_eq!(
            PageRef::Language("rust".to_string()).path(),
            "categories/rust.html"
        );
        assert_eq!(PageRef::Repo("a-b".to_string()).path(), "repos/a-b.html");
    }

    #[test]
    fn relative_hrefs() {
        let home = PageRef::Home;
        let index = PageRef::LanguageIndex;
        let rust = PageRef::Language("rust".to_string());
        let repo = PageRef::Repo("a-b".to_string());
        let other = PageRef::Repo("c-d".to_string());

        assert_eq!(repo.href_from(&home), "repos/a-b.html");
        assert_eq!(rust.href_from(&home), "categories/rust.html");
        assert_eq!(index.href_from(&home), "categories/index.html");
        assert_eq!(rust.href_from(&index), "rust.html");
        assert_eq!(index.href_from(&rust), "index.html");
        assert_eq!(home.href_from(&rust), "../index.html");
        assert_eq!(repo.href_from(&rust), "../repos/a-b.html");
        assert_eq!(rust.href_from(&repo), "../categories/rust.html");
        assert_eq!(other.href_from(&repo), "c-d.html");
        assert_eq!(home.href_from(&home), "index.html");
    }

    #[test]
    fn site_pages_cover_everything_once() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let pages = site_pages(&catalog);
        assert_eq!(pages.len(), 2 + 16 + 25);
        let mut paths: Vec<String> = pages.iter().map(PageRef::path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), pages.len());
    }

    #[test]
    fn home_stats_from_fallback() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let home = build_home(&catalog, &SiteConfig::default());

        let values: Vec<(&str, &str)> = home
            .stats
            .iter()
            .map(|s| (s.label, s.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Repositories", "25"),
                ("Total Stars", "140.9k"),
                ("Total Forks", "9.3k"),
                ("Languages", "16"),
            ]
        );
        assert_eq!(home.trending.len(), 20);
        assert_eq!(home.trending[0].full_name, "johndoe/awesome-ai-assistant");
        assert_eq!(home.trending[0].href, "repos/johndoe-awesome-ai-assistant.html");
        assert_eq!(home.languages_href, "categories/index.html");
    }

    #[test]
    fn home_languages_by_count_then_name() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let home = build_home(&catalog, &SiteConfig::default());
        let first: Vec<(&str, usize)> = home
            .languages
            .iter()
            .take(4)
            .map(|t| (t.language.as_str(), t.count))
            .collect();
        assert_eq!(
            first,
            vec![("TypeScript", 5), ("Python", 4), ("Go", 2), ("Rust", 2)]
        );
        assert_eq!(home.languages.len(), 16);
        assert_eq!(home.languages[0].href, "categories/typescript.html");
    }

    #[test]
    fn home_cards_limit_topics() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let home = build_home(&catalog, &SiteConfig::default());
        assert!(home.trending.iter().all(|c| c.topics.len() <= 4));
        assert_eq!(home.trending[0].topics, vec!["ai", "llm", "rag", "assistant"]);
    }

    #[test]
    fn empty_catalog_renders_zero_stats() {
        let catalog = Catalog::build(&[]).unwrap();
        let home = build_home(&catalog, &SiteConfig::default());
        assert!(home.stats.iter().all(|s| s.value == "0"));
        assert!(home.trending.is_empty());
        assert!(home.languages.is_empty());
        assert!(build_language_index(&catalog).languages.is_empty());
    }

    #[test]
    fn language_index_is_lexicographic_with_top_stars() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let index = build_language_index(&catalog);
        let names: Vec<&str> = index.languages.iter().map(|t| t.language.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let python = index
            .languages
            .iter()
            .find(|t| t.language == "Python")
            .unwrap();
        assert_eq!(python.count, 4);
        assert_eq!(python.top_stars, "12.5k");
        assert_eq!(python.href, "python.html");
        assert_eq!(python.icon, "🐍");

        let total: usize = index.languages.iter().map(|t| t.count).sum();
        assert_eq!(total, 25);
        assert_eq!(
            index.meta.breadcrumbs,
            vec![
                Crumb {
                    label: "Home".to_string(),
                    href: Some("../index.html".to_string())
                },
                Crumb {
                    label: "Languages".to_string(),
                    href: None
                },
            ]
        );
    }

    #[test]
    fn language_page_ranks_members() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let group = catalog.group("TypeScript").unwrap();
        let page = build_language_page(group, &SiteConfig::default());

        assert_eq!(page.meta.page.path(), "categories/typescript.html");
        assert_eq!(page.count, 5);
        let stars: Vec<&str> = page.repos.iter().map(|c| c.stars.as_str()).collect();
        assert_eq!(stars, vec!["15.4k", "6.7k", "5.8k", "4.3k", "2.1k"]);
        assert_eq!(page.repos[0].href, "../repos/webdev-nextjs-dashboard-kit.html");
        let labels: Vec<&str> = page
            .meta
            .breadcrumbs
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Home", "Languages", "TypeScript"]);
        assert_eq!(page.meta.breadcrumbs[1].href.as_deref(), Some("index.html"));
    }

    #[test]
    fn repo_page_fields() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let record = find_record(&records, "pythonista/fastapi-starter-template");
        let page = build_repo_page(record, &catalog, &SiteConfig::default());

        assert_eq!(page.meta.title, "pythonista/fastapi-starter-template");
        assert_eq!(page.owner_login, "pythonista");
        assert_eq!(page.created, "2025-01-06");
        assert_eq!(page.updated, "2025-01-28");
        assert_eq!(page.topics.len(), 5);
        assert_eq!(page.html_url, "https://github.com/pythonista/fastapi-starter-template");

        let stats: Vec<&str> = page.stats.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(stats, vec!["8.9k", "620", "42", "Python"]);

        let crumbs: Vec<(&str, Option<&str>)> = page
            .meta
            .breadcrumbs
            .iter()
            .map(|c| (c.label.as_str(), c.href.as_deref()))
            .collect();
        assert_eq!(
            crumbs,
            vec![
                ("Home", Some("../index.html")),
                ("Python", Some("../categories/python.html")),
                ("fastapi-starter-template", None),
            ]
        );
    }

    #[test]
    fn repo_page_similar_set() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let record = find_record(&records, "pythonista/fastapi-starter-template");
        let page = build_repo_page(record, &catalog, &SiteConfig::default());

        let hrefs: Vec<&str> = page.similar.iter().map(|c| c.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "johndoe-awesome-ai-assistant.html",
                "djangodev-django-saas-starter.html",
                "mlengineer-ml-pipeline-tools.html",
            ]
        );
    }

    #[test]
    fn repo_page_without_peers_has_no_similar() {
        let records = fallback_records();
        let catalog = Catalog::build(&records).unwrap();
        let record = find_record(&records, "haskeller/haskell-web-framework");
        let page = build_repo_page(record, &catalog, &SiteConfig::default());
        assert!(page.similar.is_empty());
    }

    #[test]
    fn placeholders_for_missing_description_and_language() {
        let mut item = raw(1, "ghost/mystery", None, 3);
        item.description = None;
        let records = normalize(vec![item]).unwrap();
        let catalog = Catalog::build(&records).unwrap();
        let page = build_repo_page(&records[0], &catalog, &SiteConfig::default());

        assert_eq!(page.description, "No description available");
        assert_eq!(page.language, "Unknown");
        assert_eq!(
            page.meta.breadcrumbs[1].href.as_deref(),
            Some("../categories/unknown.html")
        );

        let home = build_home(&catalog, &SiteConfig::default());
        assert_eq!(home.trending[0].description, "No description available");
        assert_eq!(home.trending[0].language, "Unknown");
    }
}
