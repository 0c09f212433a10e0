use crate::config::types::{Distro, MirrorRoot, ScoutConfig};
use crate::config::validation::normalize_base_url;
use crate::ConfigError;

fn root(
    distro: Distro,
    release: Option<&str>,
    component: Option<&str>,
    base_url: &str,
) -> MirrorRoot {
    MirrorRoot {
        distro,
        release: release.map(str::to_string),
        component: component.map(str::to_string),
        base_url: base_url.to_string(),
    }
}

/// Returns the built-in mirror roots for a distribution
///
/// These are the publicly reachable subtrees the crawler walks when no
/// `[[mirror]]` override is configured. Each entry points at a directory
/// listing; everything reachable below it stays in scope.
pub fn builtin_roots(distro: Distro) -> Vec<MirrorRoot> {
    match distro {
        Distro::Ubuntu => ["main", "restricted", "universe", "multiverse"]
            .iter()
            .map(|c| {
                root(
                    distro,
                    None,
                    Some(c),
                    &format!("https://mirrors.edge.kernel.org/ubuntu/pool/{}/", c),
                )
            })
            .collect(),

        Distro::Debian => ["main", "non-free"]
            .iter()
            .map(|c| {
                root(
                    distro,
                    None,
                    Some(c),
                    &format!("https://mirrors.edge.kernel.org/debian/pool/{}/", c),
                )
            })
            .collect(),

        Distro::Centos => ["9-stream", "10-stream"]
            .iter()
            .map(|r| {
                root(
                    distro,
                    Some(r),
                    Some("AppStream"),
                    &format!(
                        "https://dfw.mirror.rackspace.com/centos-stream/{}/AppStream/x86_64/os/Packages/",
                        r
                    ),
                )
            })
            .collect(),

        Distro::Rocky => {
            // Releases up to 9.5 have moved to the vault; newer ones are
            // still served by the live mirror.
            const VAULTED: &[&str] = &[
                "8.5", "8.6", "8.7", "8.8", "8.9", "9.0", "9.1", "9.2", "9.3", "9.4", "9.5",
            ];
            const CURRENT: &[&str] = &["9.6", "10.0"];

            let mut roots: Vec<MirrorRoot> = VAULTED
                .iter()
                .map(|r| {
                    root(
                        distro,
                        Some(r),
                        Some("AppStream"),
                        &format!(
                            "https://dl.rockylinux.org/vault/rocky/{}/AppStream/x86_64/os/Packages/",
                            r
                        ),
                    )
                })
                .collect();
            roots.extend(CURRENT.iter().map(|r| {
                root(
                    distro,
                    Some(r),
                    Some("AppStream"),
                    &format!(
                        "https://dfw.mirror.rackspace.com/rocky/{}/AppStream/x86_64/os/Packages/",
                        r
                    ),
                )
            }));
            roots
        }

        Distro::Fedora => {
            const ARCHIVED: &[&str] = &["38", "39", "40"];
            const CURRENT: &[&str] = &["41", "42"];

            let mut roots: Vec<MirrorRoot> = ARCHIVED
                .iter()
                .map(|r| {
                    root(
                        distro,
                        Some(r),
                        Some("Everything"),
                        &format!(
                            "https://download-ib01.fedoraproject.org/pub/archive/fedora/linux/releases/{}/Everything/x86_64/os/Packages/",
                            r
                        ),
                    )
                })
                .collect();
            roots.extend(CURRENT.iter().map(|r| {
                root(
                    distro,
                    Some(r),
                    Some("Everything"),
                    &format!(
                        "https://download-ib01.fedoraproject.org/pub/fedora/linux/releases/{}/Everything/x86_64/os/Packages/",
                        r
                    ),
                )
            }));
            roots
        }

        Distro::Alpine => [
            "v3.18",
            "v3.19",
            "v3.2",
            "v3.20",
            "v3.21",
            "v3.22",
            "latest-stable",
            "edge",
        ]
        .iter()
        .map(|r| {
            root(
                distro,
                Some(r),
                Some("main"),
                &format!("https://mirrors.edge.kernel.org/alpine/{}/main/x86_64/", r),
            )
        })
        .collect(),

        // Rolling release, so there are no per-release subtrees.
        Distro::Arch => vec![root(
            distro,
            None,
            Some("packages"),
            "https://mirrors.edge.kernel.org/archlinux/pool/packages/",
        )],
    }
}

/// Resolves the mirror roots to crawl for a distribution
///
/// `[[mirror]]` tables in the configuration whose `distro` matches replace
/// the built-in catalog for that distribution; tables for other
/// distributions are kept for other runs and ignored here. Every resolved
/// base URL is normalized to directory form (trailing `/`) so that RFC 3986
/// resolution and the prefix scope check agree on the subtree boundary.
pub fn resolve_roots(config: &ScoutConfig, distro: Distro) -> Result<Vec<MirrorRoot>, ConfigError> {
    let overrides: Vec<MirrorRoot> = config
        .mirror
        .iter()
        .filter(|m| m.distro == distro)
        .cloned()
        .collect();

    let mut roots = if overrides.is_empty() {
        builtin_roots(distro)
    } else {
        overrides
    };

    for mirror in &mut roots {
        mirror.base_url = normalize_base_url(&mirror.base_url)?;
    }

    Ok(roots)
}
