//! `sitemap.xml` generation.
//!
//! Entries are derived from [`site_pages`], the same list the generator
//! renders, so the sitemap and the written pages cannot disagree.

use crate::catalog::Catalog;
use crate::pages::{PageRef, site_pages};
use chrono::NaiveDate;

/// Output path of the sitemap, relative to the site root.
pub const SITEMAP_PATH: &str = "sitemap.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl PageRef {
    /// Fixed change frequency and priority per page type.
    pub fn crawl_hints(&self) -> (ChangeFreq, f32) {
        match self {
            PageRef::Home => (ChangeFreq::Daily, 1.0),
            PageRef::LanguageIndex => (ChangeFreq::Daily, 0.9),
            PageRef::Language(_) => (ChangeFreq::Daily, 0.8),
            PageRef::Repo(_) => (ChangeFreq::Weekly, 0.7),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Site-relative path, as written to the output directory.
    pub path: String,
    /// Absolute URL.
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// One entry per generated page, in [`site_pages`] order.
pub fn entries(catalog: &Catalog, base_url: &str, lastmod: NaiveDate) -> Vec<SitemapEntry> {
    site_pages(catalog)
        .into_iter()
        .map(|page| {
            let path = page.path();
            let (changefreq, priority) = page.crawl_hints();
            SitemapEntry {
                loc: base_url_join(base_url, &path),
                path,
                lastmod,
                changefreq,
                priority,
            }
        })
        .collect()
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for entry in entries {
        out.push_str("  <url>\n");
        out.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        out.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.lastmod.format("%Y-%m-%d")
        ));
        out.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq.as_str()
        ));
        out.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        out.push_str("  </url>\n");
    }
    out.push_str("</urlset>\n");
    out
}

fn base_url_join(base_url: &str, href: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = href.trim_start_matches('/');
    format!("{base}/{path}")
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
