//! HTML rendering with [maud](https://maud.lambda.xyz/).
//!
//! Renderers take a finished page context from [`crate::pages`] and lay it
//! out. All interpolation is auto-escaped; the only unescaped content is the
//! stylesheet, which is built from config colors and the embedded base CSS.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and prefixed with the
//! `:root` color variables generated from `[colors]`. Every page inlines the
//! result, so the output directory holds nothing but HTML and the sitemap.

use crate::config::{self, SiteConfig};
use crate::normalize::format_count;
use crate::pages::{
    Crumb, HomePage, LanguageIndexPage, LanguagePage, LanguageTile, PageMeta, PageRef, RepoCard,
    RepoPage,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Site-wide pieces every page shares.
#[derive(Debug, Clone)]
pub struct Layout {
    pub site_title: String,
    pub css: String,
}

impl Layout {
    pub fn new(config: &SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            site_title: config.site.title.clone(),
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(meta: &PageMeta, layout: &Layout, content: Markup) -> Markup {
    let title = format!("{} | {}", meta.title, layout.site_title);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(meta.description);
                meta property="og:title" content=(title);
                meta property="og:description" content=(meta.description);
                meta property="og:type" content="website";
                title { (title) }
                style { (PreEscaped(&layout.css)) }
            }
            body {
                (site_header(&meta.page, layout))
                main {
                    div.container {
                        @if !meta.breadcrumbs.is_empty() {
                            (breadcrumb(&meta.breadcrumbs))
                        }
                        (content)
                    }
                }
                (site_footer(layout))
            }
        }
    }
}

/// Renders the sticky header with logo and top-level links
fn site_header(page: &PageRef, layout: &Layout) -> Markup {
    let home = PageRef::Home.href_from(page);
    html! {
        header.site-header {
            div.container {
                div.header-content {
                    a.logo href=(home) {
                        span.logo-icon { "📈" }
                        span.logo-text { (layout.site_title) }
                    }
                    nav.site-nav {
                        a href=(home) { "Trending" }
                        a href=(PageRef::LanguageIndex.href_from(page)) { "Languages" }
                    }
                }
            }
        }
    }
}

fn site_footer(layout: &Layout) -> Markup {
    html! {
        footer.site-footer {
            div.container {
                p {
                    "Generated by " (layout.site_title)
                    " • Data updated daily • Not affiliated with GitHub"
                }
            }
        }
    }
}

fn breadcrumb(crumbs: &[Crumb]) -> Markup {
    html! {
        nav.breadcrumb {
            @for (idx, crumb) in crumbs.iter().enumerate() {
                @if idx > 0 {
                    span.breadcrumb-sep { "›" }
                }
                @match &crumb.href {
                    Some(href) => a href=(href) { (crumb.label) },
                    None => span.breadcrumb-current { (crumb.label) },
                }
            }
        }
    }
}

fn language_dot(color: &str) -> Markup {
    html! {
        span.lang-color style={ "background-color: " (color) } {}
    }
}

fn repo_card(card: &RepoCard) -> Markup {
    html! {
        a.repo-card href=(card.href) {
            div.repo-header {
                span.repo-name { (card.full_name) }
                span.repo-stars { "★ " (card.stars) }
            }
            p.repo-desc { (card.description) }
            div.repo-footer {
                span.repo-lang {
                    (language_dot(card.color))
                    (card.language)
                }
                span.repo-forks { "⑂ " (card.forks) }
                span.repo-issues { "◎ " (card.issues) }
            }
            @if !card.topics.is_empty() {
                div.topics {
                    @for topic in &card.topics {
                        span.topic { (topic) }
                    }
                }
            }
        }
    }
}

/// Compact card for the "similar repositories" section.
fn similar_card(card: &RepoCard) -> Markup {
    html! {
        a.repo-card href=(card.href) {
            div.repo-header {
                span.repo-name { (card.full_name) }
                span.repo-stars { "★ " (card.stars) }
            }
            p.repo-desc { (card.description) }
            div.repo-footer {
                span.repo-lang {
                    (language_dot(card.color))
                    (card.language)
                }
            }
        }
    }
}

fn repo_count(count: usize) -> String {
    match count {
        1 => "1 repo".to_string(),
        n => format!("{} repos", format_count(n as u64)),
    }
}

fn language_tile(tile: &LanguageTile, detailed: bool) -> Markup {
    html! {
        a.category-card href=(tile.href) {
            div.category-icon { (tile.icon) }
            div.category-name { (tile.language) }
            div.category-count { (repo_count(tile.count)) }
            @if detailed {
                div.category-blurb { (tile.blurb) }
                div.category-top { "Top: ★ " (tile.top_stars) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

pub fn render_home(page: &HomePage, layout: &Layout) -> Markup {
    let content = html! {
        section.hero {
            h1 { (page.heading) }
            p { (page.tagline) }
            div.stats-bar {
                @for stat in &page.stats {
                    div.stat {
                        div.stat-value { (stat.value) }
                        div.stat-label { (stat.label) }
                    }
                }
            }
        }
        section id="languages" {
            h2.section-title {
                "Browse by Language"
                a href=(page.languages_href) { "All languages →" }
            }
            div.category-grid {
                @for tile in &page.languages {
                    (language_tile(tile, false))
                }
            }
        }
        section id="trending" {
            h2.section-title { "Trending Now" }
            div.repo-grid {
                @for card in &page.trending {
                    (repo_card(card))
                }
            }
        }
    };

    base_document(&page.meta, layout, content)
}

pub fn render_language_index(page: &LanguageIndexPage, layout: &Layout) -> Markup {
    let content = html! {
        h1.section-title { "Browse by Language" }
        div.category-grid {
            @for tile in &page.languages {
                (language_tile(tile, true))
            }
        }
    };

    base_document(&page.meta, layout, content)
}

pub fn render_language_page(page: &LanguagePage, layout: &Layout) -> Markup {
    let content = html! {
        h1.section-title {
            (language_dot(page.color))
            " " (page.meta.title)
        }
        p.repo-desc { (repo_count(page.count)) " ranked by stars" }
        div.repo-grid {
            @for card in &page.repos {
                (repo_card(card))
            }
        }
    };

    base_document(&page.meta, layout, content)
}

pub fn render_repo_page(page: &RepoPage, layout: &Layout) -> Markup {
    let content = html! {
        article.repo-detail {
            div.repo-detail-header {
                img.repo-avatar src=(page.avatar_url) alt=(page.owner_login) loading="lazy";
                div.repo-detail-info {
                    h1.repo-detail-title { (page.full_name) }
                    p.repo-detail-desc { (page.description) }
                    p.repo-dates {
                        "by " (page.owner_login)
                        " • Created " (page.created)
                        " • Updated " (page.updated)
                    }
                }
            }
            @if !page.topics.is_empty() {
                div.topics {
                    @for topic in &page.topics {
                        span.topic { (topic) }
                    }
                }
            }
            div.repo-detail-stats {
                @for stat in &page.stats {
                    div.detail-stat {
                        @if stat.label == "Language" {
                            (language_dot(page.color))
                        }
                        span.detail-stat-value { (stat.value) }
                        span.detail-stat-label { (stat.label) }
                    }
                }
            }
            a.cta-button href=(page.html_url) target="_blank" rel="noopener" {
                "View on GitHub →"
            }
        }
        @if !page.similar.is_empty() {
            section.alternatives {
                h3 { "Similar " (page.language) " Repositories" }
                div.repo-grid {
                    @for card in &page.similar {
                        (similar_card(card))
                    }
                }
            }
        }
    };

    base_document(&page.meta, layout, content)
}
