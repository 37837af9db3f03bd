//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use trove_versioner::{versioner_for, SimpleVersioner, Versioner, VersionerConfig};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Protected folders, by id
    #[serde(default)]
    pub folders: BTreeMap<String, Folder>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Log level used when neither RUST_LOG nor -v is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// A protected folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Root of the folder
    pub path: PathBuf,

    /// Versioning settings
    #[serde(default)]
    pub versioning: Versioning,
}

/// Versioner selection for a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioning {
    /// Versioner type
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    /// Versioner parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// A folder chosen for one invocation, with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct ResolvedFolder {
    /// Root of the folder
    pub root: PathBuf,
    /// Versioning settings
    pub versioning: Versioning,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".trove").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Find the folder containing `file`, preferring the deepest root.
    pub fn folder_for(&self, file: &Path) -> Option<(&str, &Folder)> {
        self.folders
            .iter()
            .filter(|(_, folder)| file.starts_with(&folder.path))
            .max_by_key(|(_, folder)| folder.path.components().count())
            .map(|(id, folder)| (id.as_str(), folder))
    }

    /// Pick the folder for this invocation.
    ///
    /// `root` wins over `folder_id`, which wins over lookup by `file`.
    /// `keep` overrides the `keep` parameter either way.
    pub fn resolve(
        &self,
        root: Option<&Path>,
        folder_id: Option<&str>,
        file: &Path,
        keep: Option<usize>,
    ) -> Result<ResolvedFolder> {
        let mut resolved = if let Some(root) = root {
            ResolvedFolder {
                root: root.to_path_buf(),
                versioning: Versioning::default(),
            }
        } else if let Some(id) = folder_id {
            let folder = self
                .folders
                .get(id)
                .ok_or_else(|| CliError::Config(format!("Folder '{}' not found", id)))?;
            ResolvedFolder::from(folder)
        } else {
            let (_, folder) = self
                .folder_for(file)
                .ok_or_else(|| CliError::NoFolder(file.to_path_buf()))?;
            ResolvedFolder::from(folder)
        };

        if let Some(keep) = keep {
            resolved
                .versioning
                .params
                .insert("keep".to_string(), keep.to_string());
        }
        Ok(resolved)
    }
}

impl ResolvedFolder {
    /// Build the configured versioner.
    pub fn versioner(&self) -> Result<Box<dyn Versioner>> {
        Ok(versioner_for(
            &self.versioning.kind,
            self.root.clone(),
            &self.versioning.params,
        )?)
    }

    /// Build the simple versioner, for listing and pruning.
    pub fn simple(&self) -> Result<SimpleVersioner> {
        if self.versioning.kind != "simple" {
            return Err(trove_versioner::ConfigError::UnknownVersioner(
                self.versioning.kind.clone(),
            )
            .into());
        }
        Ok(SimpleVersioner::new(VersionerConfig::from_params(
            self.root.clone(),
            &self.versioning.params,
        )))
    }
}

impl From<&Folder> for ResolvedFolder {
    fn from(folder: &Folder) -> Self {
        Self {
            root: folder.path.clone(),
            versioning: folder.versioning.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            log_level: default_log_level(),
        }
    }
}

impl Default for Versioning {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            params: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_kind() -> String {
    "simple".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[settings]
format = "json"
color = false

[folders.docs]
path = "/srv/sync/docs"

[folders.docs.versioning]
type = "simple"
params = { keep = "10" }

[folders.nested]
path = "/srv/sync/docs/archive"

[folders.photos]
path = "/srv/sync/photos"
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.folders.is_empty());
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.settings.log_level, "warn");
    }

    #[test]
    fn test_parse_sample() {
        let config: Config = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(!config.settings.color);
        assert_eq!(config.folders.len(), 3);

        let docs = &config.folders["docs"];
        assert_eq!(docs.versioning.kind, "simple");
        assert_eq!(docs.versioning.params.get("keep").map(String::as_str), Some("10"));

        let photos = &config.folders["photos"];
        assert_eq!(photos.versioning.kind, "simple");
        assert!(photos.versioning.params.is_empty());
    }

    #[test]
    fn test_folder_for_prefers_deepest() {
        let config: Config = toml::from_str(SAMPLE).unwrap();

        let (id, _) = config
            .folder_for(Path::new("/srv/sync/docs/archive/2020/a.txt"))
            .unwrap();
        assert_eq!(id, "nested");

        let (id, _) = config.folder_for(Path::new("/srv/sync/docs/a.txt")).unwrap();
        assert_eq!(id, "docs");

        assert!(config.folder_for(Path::new("/srv/sync/docsx/a.txt")).is_none());
    }

    #[test]
    fn test_resolve_precedence() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let file = Path::new("/srv/sync/docs/a.txt");

        let resolved = config
            .resolve(Some(Path::new("/tmp/x")), Some("photos"), file, None)
            .unwrap();
        assert_eq!(resolved.root, Path::new("/tmp/x"));

        let resolved = config.resolve(None, Some("photos"), file, None).unwrap();
        assert_eq!(resolved.root, Path::new("/srv/sync/photos"));

        let resolved = config.resolve(None, None, file, Some(2)).unwrap();
        assert_eq!(resolved.root, Path::new("/srv/sync/docs"));
        assert_eq!(resolved.simple().unwrap().config().keep, 2);
    }

    #[test]
    fn test_resolve_errors() {
        let config: Config = toml::from_str(SAMPLE).unwrap();

        let err = config
            .resolve(None, Some("missing"), Path::new("/srv/sync/docs/a.txt"), None)
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));

        let err = config
            .resolve(None, None, Path::new("/elsewhere/a.txt"), None)
            .unwrap_err();
        assert!(matches!(err, CliError::NoFolder(_)));
    }

    #[test]
    fn test_unknown_versioner_type() {
        let resolved = ResolvedFolder {
            root: PathBuf::from("/data"),
            versioning: Versioning {
                kind: "staggered".to_string(),
                params: HashMap::new(),
            },
        };

        assert!(resolved.versioner().is_err());
        assert!(resolved.simple().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trove.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.folders.len(), 3);

        let missing = Config::load(Some(&tmp.path().join("nope.toml")));
        assert!(matches!(missing, Err(CliError::Io(_))));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trove.toml");
        fs::write(&path, "[folders.docs]\npath = 3\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(CliError::Toml(_))));
    }
}
