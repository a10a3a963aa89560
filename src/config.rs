//! Configuration management for the registry tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (registry.toml)
//! - Environment variables (REGISTRY__*)
//!
//! ## Example config file (registry.toml):
//! ```toml
//! [paths]
//! root = "."
//! aggregate = "registry.json"
//! legacy_dir = "registry/libraries"
//! legacy_document = "index.json"
//! host_document = "README.md"
//!
//! [validation]
//! expected_schema = "../../../schemas/library.json"
//! warn_on_missing_schema = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the registry tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Locations of the registry sources and the host document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Base directory for every relative path below
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Aggregate document holding all entries under `libraries`
    #[serde(default = "default_aggregate")]
    pub aggregate: PathBuf,

    /// Legacy layout: one subdirectory per entry
    #[serde(default = "default_legacy_dir")]
    pub legacy_dir: PathBuf,

    /// File name of the entry document inside each legacy subdirectory
    #[serde(default = "default_legacy_document")]
    pub legacy_document: String,

    /// Document the rendered library list is spliced into
    #[serde(default = "default_host_document")]
    pub host_document: PathBuf,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Expected `$schema` reference on legacy entry documents
    #[serde(default = "default_expected_schema")]
    pub expected_schema: String,

    /// Warn when a legacy entry has no `$schema` at all
    #[serde(default = "default_true")]
    pub warn_on_missing_schema: bool,
}

// Default value functions
fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_aggregate() -> PathBuf {
    PathBuf::from("registry.json")
}

fn default_legacy_dir() -> PathBuf {
    PathBuf::from("registry/libraries")
}

fn default_legacy_document() -> String {
    "index.json".to_string()
}

fn default_host_document() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_expected_schema() -> String {
    "../../../schemas/library.json".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            aggregate: default_aggregate(),
            legacy_dir: default_legacy_dir(),
            legacy_document: default_legacy_document(),
            host_document: default_host_document(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            expected_schema: default_expected_schema(),
            warn_on_missing_schema: true,
        }
    }
}

impl PathsConfig {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Aggregate document path, resolved against `root`
    pub fn aggregate_path(&self) -> PathBuf {
        self.resolve(&self.aggregate)
    }

    /// Legacy directory path, resolved against `root`
    pub fn legacy_dir_path(&self) -> PathBuf {
        self.resolve(&self.legacy_dir)
    }

    /// Host document path, resolved against `root`
    pub fn host_document_path(&self) -> PathBuf {
        self.resolve(&self.host_document)
    }
}

impl RegistryConfig {
    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "registry.toml",
            ".registry.toml",
            "config/registry.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "library-registry") {
            let xdg_config = config_dir.config_dir().join("registry.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (REGISTRY__*)
        builder = builder.add_source(
            Environment::with_prefix("REGISTRY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn with_overrides(
        mut self,
        root: Option<PathBuf>,
        aggregate: Option<PathBuf>,
        legacy_dir: Option<PathBuf>,
        host_document: Option<PathBuf>,
    ) -> Self {
        if let Some(root) = root {
            self.paths.root = root;
        }
        if let Some(aggregate) = aggregate {
            self.paths.aggregate = aggregate;
        }
        if let Some(legacy_dir) = legacy_dir {
            self.paths.legacy_dir = legacy_dir;
        }
        if let Some(host_document) = host_document {
            self.paths.host_document = host_document;
        }
        self
    }
}
