//! Configuration file support for seqgen.
//!
//! Application configuration is loaded from `$XDG_CONFIG_HOME/seqgen/config.toml`.
//! Batch input documents (`init_list` + `length`) are read from TOML, JSON
//! or YAML.

use crate::driver::BatchRequest;
use crate::export::OutputFormat;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default namespace for sequences in the structured store
pub const DEFAULT_STORE_GROUP: &str = "sequences";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Where and how generated sequences are written
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory holding the structured store when no output file is given
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_store_group")]
    pub store_group: String,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            store_group: default_store_group(),
            format: OutputFormat::default(),
        }
    }
}

impl OutputConfig {
    /// Store file used when the structured format is selected without an
    /// explicit output path
    pub fn default_store_path(&self) -> PathBuf {
        self.dir.join("sequences.jsonl")
    }
}

/// Generation parameters used when the command line omits them
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_max_number")]
    pub max_number: usize,

    #[serde(default = "default_length")]
    pub length: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_number: default_max_number(),
            length: default_length(),
        }
    }
}

// Default value functions
fn default_output_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("seqgen")
}

fn default_store_group() -> String {
    DEFAULT_STORE_GROUP.into()
}

fn default_max_number() -> usize {
    2
}

fn default_length() -> usize {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("seqgen").join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.store_group.trim().is_empty() {
            return Err(Error::Config("output.store_group must not be empty".into()));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

/// A batch input document as written by users.
///
/// Values are read as signed integers so that negative input is reported
/// as an invalid parameter rather than a parse failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchDocument {
    pub init_list: Vec<i64>,
    pub length: i64,
}

impl BatchDocument {
    /// Load a batch document, choosing the format from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let document: BatchDocument = match extension.as_deref() {
            Some("toml") => toml::from_str(&contents)?,
            Some("json") => serde_json::from_str(&contents)?,
            Some("yml" | "yaml") => serde_yaml::from_str(&contents)?,
            _ => {
                return Err(Error::Config(format!(
                    "Unsupported input document {:?}: expected a .toml, .json or .yml file",
                    path
                )))
            }
        };

        tracing::info!("Loaded batch input from {:?}", path);
        Ok(document)
    }

    /// Validate every value and convert to a batch request
    pub fn into_request(self) -> Result<BatchRequest> {
        let length = usize::try_from(self.length).map_err(|_| {
            Error::InvalidParameter(format!("length must be non-negative, got {}", self.length))
        })?;

        let initials = self
            .init_list
            .iter()
            .map(|&init| match usize::try_from(init) {
                Ok(value) if value >= 1 => Ok(value),
                _ => Err(Error::InvalidParameter(format!(
                    "init_list values must be at least 1, got {}",
                    init
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BatchRequest::new(initials, length))
    }
}
