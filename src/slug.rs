//! URL and filename slugs.
//!
//! Every generated page is addressed by a slug derived from a display string:
//! repository pages from `full_name`, language pages from the display
//! language. The same slug is used as the filename stem on disk and as the
//! path segment in links and the sitemap, so it must be stable across runs.
//!
//! ```text
//! "pythonista/fastapi-starter-template" → "pythonista-fastapi-starter-template"
//! "C++"                                 → "c"
//! "  Hello,  World!  "                  → "hello-world"
//! ```

/// Derive a slug: lower-case, every run of characters outside `[a-z0-9]`
/// collapsed to one `-`, no leading or trailing `-`.
///
/// Only ASCII alphanumerics survive. Non-ASCII letters count as separators,
/// which keeps slugs safe on every filesystem and in unencoded URLs.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
