//! Configuration module for the grapher.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `PYGRAPHER_` and use double
//! underscores to separate nested levels:
//! - `PYGRAPHER_REPOSITORY=github.com/acme/app` sets `repository`
//! - `PYGRAPHER_ROOTS__PYTHON_VERSION=python3.4` sets `roots.python_version`
//! - `PYGRAPHER_GRAPH__PRETTY=true` sets `graph.pretty`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::convert::classify::ClassificationTable;
use crate::resolve::{BuiltinPrefixes, ContainmentPolicy};

/// Directory holding the workspace configuration.
pub const CONFIG_DIR: &str = ".pygrapher";

const ENV_PREFIX: &str = "PYGRAPHER_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// URI of the repository under analysis (e.g. `github.com/acme/app`)
    #[serde(default)]
    pub repository: String,

    /// Workspace root directory (where .pygrapher is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Sandbox filesystem layout
    #[serde(default)]
    pub roots: RootsConfig,

    /// Requirement matching
    #[serde(default)]
    pub requirements: RequirementsConfig,

    /// Output identities and classification
    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the analyzer sandbox mounts the code it sees.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RootsConfig {
    /// Mount point of the analyzed repository
    #[serde(default = "default_source_root")]
    pub source_root: String,

    /// Interpreter directory name, e.g. `python2.7`
    #[serde(default = "default_python_version")]
    pub python_version: String,

    /// Standard library location; derived from `python_version` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdlib_dir: Option<String>,

    /// Dependency install location; derived from `python_version` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_packages_dir: Option<String>,

    /// Whether paths climbing out of a root with `..` still count as inside it
    #[serde(default)]
    pub containment: ContainmentPolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RequirementsConfig {
    /// Containment used when matching package and module names
    #[serde(default = "default_requirement_containment")]
    pub containment: ContainmentPolicy,

    /// Source file extension without the dot
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GraphConfig {
    /// Repository standard-library symbols are attributed to
    #[serde(default = "default_stdlib_repository")]
    pub stdlib_repository: String,

    /// Source unit type carried by every key
    #[serde(default = "default_unit_type")]
    pub unit_type: String,

    /// Source unit name carried by every key
    #[serde(default = "default_unit_name")]
    pub unit_name: String,

    /// File name marking a module as a package
    #[serde(default = "default_package_init_file")]
    pub package_init_file: String,

    /// Pretty-print output JSON
    #[serde(default)]
    pub pretty: bool,

    /// Fileless interpreter namespaces and their canonical stdlib paths
    #[serde(default)]
    pub builtin_prefixes: BuiltinPrefixes,

    /// Analyzer kind -> classification
    #[serde(default)]
    pub kinds: ClassificationTable,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `"pygrapher::convert" = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_source_root() -> String {
    "/src".to_string()
}
fn default_python_version() -> String {
    "python2.7".to_string()
}
fn default_requirement_containment() -> ContainmentPolicy {
    ContainmentPolicy::Lexical
}
fn default_source_extension() -> String {
    "py".to_string()
}
fn default_stdlib_repository() -> String {
    "hg.python.org/cpython".to_string()
}
fn default_unit_type() -> String {
    "FauxPackage".to_string()
}
fn default_unit_name() -> String {
    "FauxPackage".to_string()
}
fn default_package_init_file() -> String {
    "__init__.py".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            repository: String::new(),
            workspace_root: None,
            roots: RootsConfig::default(),
            requirements: RequirementsConfig::default(),
            graph: GraphConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            python_version: default_python_version(),
            stdlib_dir: None,
            site_packages_dir: None,
            containment: ContainmentPolicy::default(),
        }
    }
}

impl RootsConfig {
    /// Standard library root, `/usr/lib/<python_version>` unless overridden.
    pub fn stdlib_dir(&self) -> String {
        self.stdlib_dir
            .clone()
            .unwrap_or_else(|| format!("/usr/lib/{}", self.python_version))
    }

    /// Dependency install root, `/venv/lib/<python_version>/site-packages`
    /// unless overridden.
    pub fn site_packages_dir(&self) -> String {
        self.site_packages_dir
            .clone()
            .unwrap_or_else(|| format!("/venv/lib/{}/site-packages", self.python_version))
    }
}

impl Default for RequirementsConfig {
    fn default() -> Self {
        Self {
            containment: default_requirement_containment(),
            source_extension: default_source_extension(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            stdlib_repository: default_stdlib_repository(),
            unit_type: default_unit_type(),
            unit_name: default_unit_name(),
            package_init_file: default_package_init_file(),
            pretty: false,
            builtin_prefixes: BuiltinPrefixes::default(),
            kinds: ClassificationTable::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

/// Environment provider: `PYGRAPHER_A__B_C` sets `a.b_c`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().replace("__", ".").into())
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            .merge(env_provider())
    }

    /// Find the workspace config by looking for a .pygrapher directory
    /// from the current directory up to the filesystem root
    pub fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join("settings.toml"))
    }

    /// Get the workspace root directory (where .pygrapher is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> Result<(), String> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        if !config_path.exists() {
            return Err("No configuration file found".to_string());
        }

        match std::fs::read_to_string(&config_path) {
            Ok(content) => {
                if let Err(e) = toml::from_str::<Settings>(&content) {
                    return Err(format!(
                        "Configuration file is corrupted: {e}\nRun 'pygrapher init --force' to regenerate."
                    ));
                }
            }
            Err(e) => {
                return Err(format!("Cannot read configuration file: {e}"));
            }
        }

        Ok(())
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under `dir`
    pub fn init_config_file(dir: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = dir.join(CONFIG_DIR).join("settings.toml");

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        let settings = Settings {
            workspace_root: Some(dir.to_path_buf()),
            ..Settings::default()
        };
        settings.save(&config_path)?;

        Ok(config_path)
    }
}
