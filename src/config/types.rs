use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The Linux distributions whose mirrors can be crawled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distro {
    Ubuntu,
    Debian,
    Centos,
    Rocky,
    Fedora,
    Arch,
    Alpine,
}

impl Distro {
    /// All supported distributions, in the order the CLI lists them
    pub const ALL: [Distro; 7] = [
        Distro::Ubuntu,
        Distro::Debian,
        Distro::Centos,
        Distro::Rocky,
        Distro::Fedora,
        Distro::Arch,
        Distro::Alpine,
    ];

    /// The lowercase selector name, also used as the output directory name
    pub fn as_str(&self) -> &'static str {
        match self {
            Distro::Ubuntu => "ubuntu",
            Distro::Debian => "debian",
            Distro::Centos => "centos",
            Distro::Rocky => "rocky",
            Distro::Fedora => "fedora",
            Distro::Arch => "arch",
            Distro::Alpine => "alpine",
        }
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distro {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ubuntu" => Ok(Distro::Ubuntu),
            "debian" => Ok(Distro::Debian),
            "centos" => Ok(Distro::Centos),
            "rocky" => Ok(Distro::Rocky),
            "fedora" => Ok(Distro::Fedora),
            "arch" => Ok(Distro::Arch),
            "alpine" => Ok(Distro::Alpine),
            _ => Err(ConfigError::UnknownDistro(s.to_string())),
        }
    }
}

/// One mirror subtree to crawl: a distribution, an optional release and
/// component label, and the directory URL the crawl is rooted at and
/// scoped to
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorRoot {
    pub distro: Distro,

    /// Release the subtree belongs to (e.g. "9-stream"), if the mirror
    /// splits by release
    #[serde(default)]
    pub release: Option<String>,

    /// Component or repository label (e.g. "main"), if the mirror splits
    /// by component
    #[serde(default)]
    pub component: Option<String>,

    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Main configuration structure for Mirror-Scout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Mirror roots overriding the built-in catalog for their distribution
    #[serde(default)]
    pub mirror: Vec<MirrorRoot>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link depth to follow below each mirror root
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of mirror roots crawled concurrently
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: u32,

    /// Timeout for a single page fetch, in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        CrawlerConfig {
            max_depth: default_max_depth(),
            max_workers: default_max_workers(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the per-distribution ledger trees are created under
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: default_output_directory(),
        }
    }
}

fn default_max_depth() -> u32 {
    10
}

fn default_max_workers() -> u32 {
    10
}

fn default_fetch_timeout_secs() -> u64 {
    5
}

fn default_output_directory() -> String {
    ".".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distro_from_str_all_selectors() {
        for distro in Distro::ALL {
            assert_eq!(distro.as_str().parse::<Distro>().unwrap(), distro);
        }
    }

    #[test]
    fn test_distro_from_str_is_case_insensitive() {
        assert_eq!("Ubuntu".parse::<Distro>().unwrap(), Distro::Ubuntu);
        assert_eq!("ROCKY".parse::<Distro>().unwrap(), Distro::Rocky);
    }

    #[test]
    fn test_distro_from_str_rejects_unknown() {
        let err = "gentoo".parse::<Distro>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDistro(ref s) if s == "gentoo"));
    }

    #[test]
    fn test_distro_display_matches_selector() {
        assert_eq!(Distro::Centos.to_string(), "centos");
        assert_eq!(Distro::Alpine.to_string(), "alpine");
    }

    #[test]
    fn test_default_config_values() {
        let config = ScoutConfig::default();
        assert_eq!(config.crawler.max_depth, 10);
        assert_eq!(config.crawler.max_workers, 10);
        assert_eq!(config.crawler.fetch_timeout_secs, 5);
        assert_eq!(config.output.directory, ".");
        assert!(config.mirror.is_empty());
    }
}
