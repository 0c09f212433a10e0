//! Link extraction from mirror listing pages
//!
//! This module turns one fetched listing body into the candidate child URLs
//! of that page:
//! - Anchor hrefs are collected in document order
//! - A raw attribute scan recovers links when the DOM pass comes up empty
//! - Candidates are resolved against the page URL and scoped to the mirror
//!   subtree

use crate::url::{in_scope, is_navigation_token};
use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

/// Extracts the in-scope child URLs of one listing page
///
/// Each anchor href is resolved against `current_url`, then kept only if it
/// stays inside `base_url`'s subtree. Literal navigation entries (`.`,
/// `..`, `./`, `../`) are dropped before resolution. The result preserves
/// document order and keeps duplicates; the crawl frontier deduplicates at
/// dequeue time.
///
/// This function never fails: markup the DOM parser cannot make sense of
/// degrades to a permissive raw scan, and a page without usable anchors
/// yields an empty list.
///
/// # Arguments
///
/// * `body` - The HTML body of the listing page
/// * `current_url` - The URL the body was fetched from, used for resolution
/// * `base_url` - The mirror root the crawl is scoped to
pub fn extract_links(body: &str, current_url: &Url, base_url: &Url) -> Vec<String> {
    let mut hrefs = dom_hrefs(body);

    if hrefs.is_empty() {
        hrefs = raw_hrefs(body);
        if !hrefs.is_empty() {
            warn!(
                "DOM pass found no anchors at {}, raw scan recovered {}",
                current_url,
                hrefs.len()
            );
        }
    }

    hrefs
        .into_iter()
        .filter(|href| !is_navigation_token(href))
        .filter_map(|href| current_url.join(&href).ok())
        .filter(|candidate| in_scope(candidate, base_url))
        .map(|candidate| candidate.to_string())
        .collect()
}

/// Collects anchor hrefs via the DOM parser, in document order
fn dom_hrefs(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let mut hrefs = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}

/// Scans for `href=` attribute values without a DOM
///
/// Handles double-quoted, single-quoted, and unquoted values. This is the
/// last-resort pass for listings whose markup the DOM parser reduced to
/// nothing; it trades precision for recall.
fn raw_hrefs(body: &str) -> Vec<String> {
    let lower = body.to_ascii_lowercase();
    let bytes = body.as_bytes();
    let mut hrefs = Vec::new();
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find("href") {
        let mut i = pos + offset + 4;
        // Resume after this attribute name even when it carries no value.
        pos = i;

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let value = if bytes[i] == b'"' || bytes[i] == b'\'' {
            let quote = bytes[i];
            i += 1;
            let start = i;
            while i < bytes.len() && bytes[i] != quote {
                i += 1;
            }
            &body[start..i]
        } else {
            let start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                i += 1;
            }
            &body[start..i]
        };

        if !value.is_empty() {
            hrefs.push(value.to_string());
        }
        pos = i.min(body.len());
    }

    hrefs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://mirror.example.com/pool/main/").unwrap()
    }

    #[test]
    fn test_relative_links_resolve_against_current_page() {
        let current = Url::parse("https://mirror.example.com/pool/main/a/").unwrap();
        let html = r#"<html><body><a href="acl/">acl/</a></body></html>"#;

        let links = extract_links(html, &current, &base());
        assert_eq!(links, vec!["https://mirror.example.com/pool/main/a/acl/"]);
    }

    #[test]
    fn test_document_order_and_duplicates_preserved() {
        let html = r#"
            <html><body>
                <a href="b/">b/</a>
                <a href="a.deb">a.deb</a>
                <a href="b/">b/</a>
            </body></html>
        "#;

        let links = extract_links(html, &base(), &base());
        assert_eq!(
            links,
            vec![
                "https://mirror.example.com/pool/main/b/",
                "https://mirror.example.com/pool/main/a.deb",
                "https://mirror.example.com/pool/main/b/",
            ]
        );
    }

    #[test]
    fn test_navigation_tokens_are_dropped() {
        let html = r#"
            <html><body>
                <a href=".">self</a>
                <a href="..">parent</a>
                <a href="./">self</a>
                <a href="../">parent</a>
                <a href="real/">real</a>
            </body></html>
        "#;

        let links = extract_links(html, &base(), &base());
        assert_eq!(links, vec!["https://mirror.example.com/pool/main/real/"]);
    }

    #[test]
    fn test_other_hosts_are_dropped() {
        let html = r#"
            <html><body>
                <a href="https://evil.example/x">off-site</a>
                <a href="https://mirror.example.com/pool/main/keep/">keep</a>
            </body></html>
        "#;

        let links = extract_links(html, &base(), &base());
        assert_eq!(links, vec!["https://mirror.example.com/pool/main/keep/"]);
    }

    #[test]
    fn test_links_above_the_base_are_dropped() {
        let current = Url::parse("https://mirror.example.com/pool/main/a/b/").unwrap();
        let html = r#"
            <html><body>
                <a href="/../../etc">escape</a>
                <a href="../../../../etc/passwd">escape</a>
                <a href="/pool/universe/">sibling</a>
                <a href="c/">child</a>
            </body></html>
        "#;

        let links = extract_links(html, &current, &base());
        assert_eq!(
            links,
            vec!["https://mirror.example.com/pool/main/a/b/c/"]
        );
    }

    #[test]
    fn test_special_scheme_links_are_dropped() {
        let html = r#"
            <html><body>
                <a href="mailto:admin@mirror.example.com">mail</a>
                <a href="javascript:void(0)">js</a>
                <a href="pkg.rpm">pkg</a>
            </body></html>
        "#;

        let links = extract_links(html, &base(), &base());
        assert_eq!(links, vec!["https://mirror.example.com/pool/main/pkg.rpm"]);
    }

    #[test]
    fn test_package_and_directory_links_both_returned() {
        // Classification happens at the frontier, not here.
        let html = r#"<html><body><a href="a/">a/</a><a href="x.deb">x.deb</a></body></html>"#;

        let links = extract_links(html, &base(), &base());
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_empty_listing_yields_no_links() {
        let html = r#"<html><body><h1>Index of /pool/main</h1></body></html>"#;
        assert!(extract_links(html, &base(), &base()).is_empty());
        assert!(extract_links("", &base(), &base()).is_empty());
    }

    #[test]
    fn test_raw_scan_recovers_links_from_broken_markup() {
        // No anchor elements survive the DOM pass here, only bare attribute
        // text in what looks like a corrupted listing.
        let body = "Index of /pool/main\n href=\"sub/\" 2024-01-01\n href='x.deb' 812K\n";

        let links = extract_links(body, &base(), &base());
        assert_eq!(
            links,
            vec![
                "https://mirror.example.com/pool/main/sub/",
                "https://mirror.example.com/pool/main/x.deb",
            ]
        );
    }

    #[test]
    fn test_raw_scan_value_forms() {
        assert_eq!(
            raw_hrefs(r#"href="double" href='single' href=bare>"#),
            vec!["double", "single", "bare"]
        );
        assert_eq!(raw_hrefs("href = spaced"), vec!["spaced"]);
        assert!(raw_hrefs("href").is_empty());
        assert!(raw_hrefs("href=").is_empty());
        assert!(raw_hrefs("no attributes here").is_empty());
    }

    #[test]
    fn test_raw_scan_handles_multibyte_text() {
        let body = "véhicule href=\"sub/\" déjà-vu";
        assert_eq!(raw_hrefs(body), vec!["sub/"]);
    }
}
