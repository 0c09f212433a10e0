use url::Url;

/// Checks whether an href is a directory-listing navigation entry
///
/// Mirror index pages carry parent/self links ("." ".." "./" "../") that
/// would walk the crawl out of its subtree or back onto itself.
pub fn is_navigation_token(href: &str) -> bool {
    matches!(href, "." | ".." | "./" | "../")
}

/// Checks whether a resolved URL stays inside the mirror subtree
///
/// A candidate is in scope when its host matches the base URL's host and
/// its string form starts with the base URL. Base URLs are normalized to
/// end with `/`, so the prefix test is a real subtree boundary: relative
/// escapes like `../../` have already been collapsed by RFC 3986
/// resolution and land outside the prefix.
///
/// # Arguments
///
/// * `candidate` - The resolved absolute URL of a discovered link
/// * `base` - The mirror root the crawl is scoped to
pub fn in_scope(candidate: &Url, base: &Url) -> bool {
    if candidate.host_str() != base.host_str() {
        return false;
    }

    candidate.as_str().starts_with(base.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_navigation_tokens() {
        assert!(is_navigation_token("."));
        assert!(is_navigation_token(".."));
        assert!(is_navigation_token("./"));
        assert!(is_navigation_token("../"));

        assert!(!is_navigation_token(".hidden/"));
        assert!(!is_navigation_token("a/"));
        assert!(!is_navigation_token(""));
    }

    #[test]
    fn test_subtree_urls_are_in_scope() {
        let base = url("https://mirror.example.com/ubuntu/pool/main/");
        assert!(in_scope(
            &url("https://mirror.example.com/ubuntu/pool/main/a/"),
            &base
        ));
        assert!(in_scope(
            &url("https://mirror.example.com/ubuntu/pool/main/a/acl/acl_2.3.1.deb"),
            &base
        ));
        assert!(in_scope(&base, &base));
    }

    #[test]
    fn test_other_hosts_are_out_of_scope() {
        let base = url("https://mirror.example.com/ubuntu/pool/main/");
        assert!(!in_scope(
            &url("https://evil.example.com/ubuntu/pool/main/a/"),
            &base
        ));
        assert!(!in_scope(&url("http://other.example.org/"), &base));
    }

    #[test]
    fn test_sibling_directories_are_out_of_scope() {
        let base = url("https://mirror.example.com/ubuntu/pool/main/");
        assert!(!in_scope(
            &url("https://mirror.example.com/ubuntu/pool/universe/"),
            &base
        ));
        assert!(!in_scope(
            &url("https://mirror.example.com/ubuntu/pool/"),
            &base
        ));
    }

    #[test]
    fn test_resolved_parent_escapes_are_out_of_scope() {
        let base = url("https://mirror.example.com/pool/main/");
        let page = url("https://mirror.example.com/pool/main/a/b/");

        // Resolution collapses the dot segments before the scope test runs.
        let escaped = page.join("../../../../etc/passwd").unwrap();
        assert_eq!(escaped.as_str(), "https://mirror.example.com/etc/passwd");
        assert!(!in_scope(&escaped, &base));
    }

    #[test]
    fn test_prefix_match_is_on_the_whole_string() {
        let base = url("https://mirror.example.com/pool/main/");
        // Same host, path that merely shares a string prefix of the path
        // component without the directory boundary.
        assert!(!in_scope(
            &url("https://mirror.example.com/pool/main-backup/a/"),
            &base
        ));
    }
}
