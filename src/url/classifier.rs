/// Path suffixes that mark a URL as a package artifact
///
/// A URL ending in one of these is recorded immediately and never fetched.
pub const PACKAGE_EXTENSIONS: [&str; 10] = [
    ".deb", ".rpm", ".zst", ".apk", ".tar.gz", ".tgz", ".tar.bz2", ".zip", ".xz", ".tar.xz",
];

/// Checks whether a URL points at a package artifact
///
/// The decision looks only at the path: any query string or fragment is
/// stripped first, then the remainder is compared case-insensitively
/// against the known package extensions. Strings that do not parse as URLs
/// are fine; this is a pure suffix test.
///
/// # Arguments
///
/// * `url` - The absolute URL string to classify
///
/// # Returns
///
/// `true` if the URL names a package file, `false` for anything that might
/// be a navigable listing
///
/// # Examples
///
/// ```
/// use mirror_scout::url::is_package_artifact;
///
/// assert!(is_package_artifact(
///     "https://mirrors.edge.kernel.org/ubuntu/pool/main/a/acl/acl_2.3.1-1_amd64.deb"
/// ));
/// assert!(is_package_artifact("https://mirror.example.com/pkg/htop.RPM?mirror=3"));
/// assert!(!is_package_artifact("https://mirrors.edge.kernel.org/ubuntu/pool/main/a/"));
/// ```
pub fn is_package_artifact(url: &str) -> bool {
    let path = match url.find(|c| c == '?' || c == '#') {
        Some(idx) => &url[..idx],
        None => url,
    };

    let path = path.to_ascii_lowercase();
    PACKAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_every_package_extension() {
        for ext in PACKAGE_EXTENSIONS {
            let url = format!("https://mirror.example.com/pool/pkg{}", ext);
            assert!(is_package_artifact(&url), "missed {}", ext);
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(is_package_artifact("https://mirror.example.com/PKG.DEB"));
        assert!(is_package_artifact("https://mirror.example.com/pkg.Tar.Gz"));
        assert!(is_package_artifact("https://mirror.example.com/kernel.TAR.XZ"));
    }

    #[test]
    fn test_query_string_is_ignored() {
        assert!(is_package_artifact(
            "https://mirror.example.com/pool/a.rpm?mirror=3"
        ));
        assert!(!is_package_artifact(
            "https://mirror.example.com/pool/listing?name=a.rpm"
        ));
    }

    #[test]
    fn test_fragment_is_ignored() {
        assert!(is_package_artifact(
            "https://mirror.example.com/pool/a.apk#checksum"
        ));
        assert!(!is_package_artifact(
            "https://mirror.example.com/pool/#a.apk"
        ));
    }

    #[test]
    fn test_extension_must_be_the_suffix() {
        assert!(!is_package_artifact("https://mirror.example.com/a.deb.md5"));
        assert!(!is_package_artifact("https://mirror.example.com/a.deb.asc"));
        assert!(!is_package_artifact("https://mirror.example.com/deb/"));
    }

    #[test]
    fn test_directory_urls_are_not_packages() {
        assert!(!is_package_artifact("https://mirror.example.com/pool/main/"));
        assert!(!is_package_artifact("https://mirror.example.com"));
        assert!(!is_package_artifact(""));
    }

    #[test]
    fn test_tar_xz_and_plain_xz_both_match() {
        assert!(is_package_artifact("https://mirror.example.com/a.tar.xz"));
        assert!(is_package_artifact("https://mirror.example.com/a.xz"));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let url = "https://mirror.example.com/pool/a.deb?x=1#frag";
        assert_eq!(is_package_artifact(url), is_package_artifact(url));
    }
}
