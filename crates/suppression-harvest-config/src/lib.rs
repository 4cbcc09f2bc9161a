use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid label_prefix {prefix:?} in {config_path}: must be non-empty without whitespace")]
    InvalidLabelPrefix { config_path: PathBuf, prefix: String },
}

/// Run settings read from `config.toml`.
///
/// ```toml
/// log_path = "~/build/valgrind.log"
/// output_path = "~/src/project/valgrind.supp"
/// existing_path = "~/src/project/valgrind.supp"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Diagnostic log to scan.
    pub log_path: PathBuf,
    /// Suppression file to (re)create.
    pub output_path: PathBuf,
    /// Suppressions already committed in earlier runs.
    #[serde(default)]
    pub start_offset: Option<u64>,
    /// Earlier suppression file to continue from and deduplicate against.
    #[serde(default)]
    pub existing_path: Option<PathBuf>,
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
}

pub fn default_label_prefix() -> String {
    "new".to_string()
}

impl Config {
    pub fn new(log_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            log_path,
            output_path,
            start_offset: None,
            existing_path: None,
            label_prefix: default_label_prefix(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.label_prefix.is_empty() || config.label_prefix.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidLabelPrefix {
                config_path: config_path.to_path_buf(),
                prefix: config.label_prefix,
            });
        }

        // Expand shell variables and tilde in every configured path
        config.log_path = Self::expand_path(&config.log_path).unwrap_or(config.log_path);
        config.output_path = Self::expand_path(&config.output_path).unwrap_or(config.output_path);
        config.existing_path = config
            .existing_path
            .map(|p| Self::expand_path(&p).unwrap_or(p));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/suppression-harvest");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
