//! Configuration for the simple versioner
//!
//! Defines the protected root and how many archived copies to keep.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Number of archived copies kept when nothing else is configured
pub const DEFAULT_KEEP: usize = 5;

/// Directory reserved for internal metadata inside the protected root
pub const MARKER_DIR: &str = ".stfolder";

/// Directory holding the archive tree, inside [`MARKER_DIR`]
pub const VERSIONS_DIR: &str = ".stversions";

/// Retention policy for one protected root
///
/// # Examples
///
/// ```
/// use trove_versioner::VersionerConfig;
///
/// let config = VersionerConfig::new("/srv/sync/docs");
/// assert_eq!(config.keep, 5);
///
/// let config = config.with_keep(2);
/// assert_eq!(config.keep, 2);
/// assert!(config.versions_dir().ends_with(".stfolder/.stversions"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionerConfig {
    /// Root of the protected tree
    pub root: PathBuf,

    /// Maximum number of archived copies per file
    /// Default: 5
    #[serde(default = "default_keep")]
    pub keep: usize,
}

fn default_keep() -> usize {
    DEFAULT_KEEP
}

impl VersionerConfig {
    /// Create a configuration for `root` with the default keep count
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            keep: DEFAULT_KEEP,
        }
    }

    /// Override the keep count
    pub fn with_keep(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    /// Build a configuration from string-keyed parameters
    ///
    /// Recognizes `keep`. A missing, unparsable or negative value falls back
    /// to [`DEFAULT_KEEP`].
    pub fn from_params(root: impl Into<PathBuf>, params: &HashMap<String, String>) -> Self {
        let keep = params
            .get("keep")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_KEEP);

        Self {
            root: root.into(),
            keep,
        }
    }

    /// Root of the archive tree
    pub fn versions_dir(&self) -> PathBuf {
        self.root.join(MARKER_DIR).join(VERSIONS_DIR)
    }

    /// Protected root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_keep() {
        let config = VersionerConfig::new("/data");
        assert_eq!(config.keep, DEFAULT_KEEP);
        assert_eq!(config.root(), Path::new("/data"));
    }

    #[test]
    fn test_from_params_parses_keep() {
        let config = VersionerConfig::from_params("/data", &params(&[("keep", "12")]));
        assert_eq!(config.keep, 12);

        let config = VersionerConfig::from_params("/data", &params(&[("keep", " 0 ")]));
        assert_eq!(config.keep, 0);
    }

    #[test]
    fn test_from_params_falls_back_to_default() {
        for bad in ["", "many", "-3", "2.5"] {
            let config = VersionerConfig::from_params("/data", &params(&[("keep", bad)]));
            assert_eq!(config.keep, DEFAULT_KEEP, "keep = {:?}", bad);
        }

        let config = VersionerConfig::from_params("/data", &HashMap::new());
        assert_eq!(config.keep, DEFAULT_KEEP);
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let pairs = params(&[("cleanInterval", "3600"), ("keep", "3")]);
        let config = VersionerConfig::from_params("/data", &pairs);
        assert_eq!(config.keep, 3);
    }

    #[test]
    fn test_versions_dir() {
        let config = VersionerConfig::new("/data");
        assert_eq!(
            config.versions_dir(),
            Path::new("/data").join(".stfolder").join(".stversions")
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = VersionerConfig::new("/data").with_keep(9);
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: VersionerConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_serde_default_keep() {
        let config: VersionerConfig = serde_json::from_str(r#"{"root":"/data"}"#).unwrap();
        assert_eq!(config.keep, DEFAULT_KEEP);
    }
}
