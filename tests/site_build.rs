//! End-to-end build of the fallback site into a temp directory.

use chrono::NaiveDate;
use repo_trends::config::SiteConfig;
use repo_trends::generate::{Site, build_site, write_site};
use repo_trends::source::{FallbackSource, RecordSource};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 28).unwrap()
}

fn fallback_site(config: &SiteConfig) -> Site {
    build_site(FallbackSource.fetch().unwrap(), config, run_date()).unwrap()
}

/// All `href="..."` values in a document.
fn hrefs(html: &str) -> Vec<&str> {
    html.split("href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect()
}

/// Resolve a relative link against the directory of `from` (both site-relative).
fn resolve(from: &str, href: &str) -> String {
    let mut parts: Vec<&str> = from.split('/').collect();
    parts.pop();
    for segment in href.split('/') {
        match segment {
            ".." => {
                parts.pop();
            }
            "." | "" => {}
            s => parts.push(s),
        }
    }
    parts.join("/")
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

#[test]
fn build_writes_expected_tree() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("dist");
    let site = fallback_site(&SiteConfig::default());
    write_site(&site.manifest, &out).unwrap();

    for path in [
        "index.html",
        "sitemap.xml",
        "categories/index.html",
        "categories/python.html",
        "categories/typescript.html",
        "categories/c.html",
        "repos/pythonista-fastapi-starter-template.html",
        "repos/haskeller-haskell-web-framework.html",
    ] {
        assert!(out.join(path).is_file(), "missing {path}");
    }

    let html_files = fs::read_dir(out.join("repos")).unwrap().count();
    assert_eq!(html_files, 25);
    let category_files = fs::read_dir(out.join("categories")).unwrap().count();
    assert_eq!(category_files, 17);
}

#[test]
fn every_internal_link_resolves() {
    let site = fallback_site(&SiteConfig::default());
    let paths: BTreeSet<&str> = site.manifest.files.keys().map(String::as_str).collect();

    for page in site.manifest.page_paths() {
        let html = site.manifest.get(page).unwrap();
        for href in hrefs(html) {
            if is_external(href) {
                continue;
            }
            let target = resolve(page, href);
            assert!(
                paths.contains(target.as_str()),
                "{page} links to {href} ({target}), which was not generated"
            );
        }
    }
}

#[test]
fn every_page_is_reachable_from_home() {
    let site = fallback_site(&SiteConfig::default());
    let mut seen = BTreeSet::new();
    let mut queue = vec!["index.html".to_string()];
    while let Some(page) = queue.pop() {
        if !seen.insert(page.clone()) {
            continue;
        }
        let html = site.manifest.get(&page).unwrap();
        for href in hrefs(html) {
            if !is_external(href) {
                queue.push(resolve(&page, href));
            }
        }
    }
    let pages: BTreeSet<String> = site.manifest.page_paths().map(str::to_string).collect();
    assert_eq!(seen, pages);
}

#[test]
fn sitemap_paths_equal_page_paths() {
    let mut config = SiteConfig::default();
    config.site.base_url = "https://trends.example.org/".to_string();
    let site = fallback_site(&config);
    let xml = site.manifest.get("sitemap.xml").unwrap();

    let listed: BTreeSet<&str> = xml
        .split("<loc>")
        .skip(1)
        .filter_map(|rest| rest.split("</loc>").next())
        .map(|loc| loc.trim_start_matches("https://trends.example.org/"))
        .collect();
    let pages: BTreeSet<&str> = site.manifest.page_paths().collect();
    assert_eq!(listed, pages);
}

#[test]
fn same_date_builds_are_byte_identical() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_site(&fallback_site(&SiteConfig::default()).manifest, first.path()).unwrap();
    write_site(&fallback_site(&SiteConfig::default()).manifest, second.path()).unwrap();

    let site = fallback_site(&SiteConfig::default());
    for path in site.manifest.files.keys() {
        let a = fs::read(first.path().join(path)).unwrap();
        let b = fs::read(second.path().join(path)).unwrap();
        assert_eq!(a, b, "{path} differs between runs");
    }
}

#[test]
fn fallback_scenario() {
    let site = fallback_site(&SiteConfig::default());

    assert_eq!(site.report.languages.len(), 16);
    let total: usize = site.report.languages.iter().map(|l| l.count).sum();
    assert_eq!(total, 25);

    let home = site.manifest.get("index.html").unwrap();
    assert!(home.contains("140.9k"));

    let fastapi = site
        .manifest
        .get("repos/pythonista-fastapi-starter-template.html")
        .unwrap();
    let similar = fastapi.split("class=\"alternatives\"").nth(1).unwrap();
    let links = hrefs(similar);
    let repo_links: Vec<&str> = links
        .iter()
        .copied()
        .filter(|h| h.ends_with(".html") && !h.starts_with(".."))
        .collect();
    assert_eq!(
        repo_links,
        vec![
            "johndoe-awesome-ai-assistant.html",
            "djangodev-django-saas-starter.html",
            "mlengineer-ml-pipeline-tools.html",
        ]
    );
}

#[test]
fn rebuild_overwrites_in_place() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    fs::write(out.join("keep.txt"), "untouched").unwrap();
    fs::create_dir_all(out.join("repos")).unwrap();
    fs::write(out.join("repos/johndoe-awesome-ai-assistant.html"), "stale").unwrap();

    write_site(&fallback_site(&SiteConfig::default()).manifest, out).unwrap();

    let page = fs::read_to_string(out.join("repos/johndoe-awesome-ai-assistant.html")).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert_eq!(
        fs::read_to_string(out.join("keep.txt")).unwrap(),
        "untouched"
    );
}
