//! Configuration management for petfacts
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fact provider endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Fetch loop configuration
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Report output configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// Fact provider endpoints and HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Cat fact endpoint, one fact per call
    #[serde(default = "default_cat_fact_url")]
    pub cat_url: String,

    /// Dog fact endpoint, batch of facts per call
    #[serde(default = "default_dog_fact_url")]
    pub dog_url: String,

    /// Batch size requested from the dog endpoint per call
    #[serde(default = "default_dog_batch_size")]
    pub dog_batch_size: u32,

    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Fetch loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Cat facts requested per gather run
    #[serde(default = "default_cat_count")]
    pub cat_count: usize,

    /// Dog facts requested per gather run
    #[serde(default = "default_dog_count")]
    pub dog_count: usize,

    /// Attempt budget multiplier: a loop gives up after
    /// `requested * attempt_multiplier` provider calls
    #[serde(default = "default_attempt_multiplier")]
    pub attempt_multiplier: u32,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// CSV file name, relative to the base directory
    #[serde(default = "default_csv_file")]
    pub csv_file: String,

    /// Chart output directory, relative to the base directory
    #[serde(default = "default_chart_dir")]
    pub chart_dir: String,

    /// Words shown per bar chart
    #[serde(default = "default_top_words")]
    pub top_words: usize,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for petfacts data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,

    /// Path to SQLite database
    pub db_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig::default(),
            fetch: FetchConfig::default(),
            report: ReportConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            cat_url: default_cat_fact_url(),
            dog_url: default_dog_fact_url(),
            dog_batch_size: default_dog_batch_size(),
            timeout_secs: default_provider_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            cat_count: default_cat_count(),
            dog_count: default_dog_count(),
            attempt_multiplier: default_attempt_multiplier(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            csv_file: default_csv_file(),
            chart_dir: default_chart_dir(),
            top_words: default_top_words(),
        }
    }
}

impl Config {
    /// Get the default base directory for petfacts (~/.petfacts)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".petfacts")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    /// Initialize paths configuration
    fn init_paths(&mut self, base_dir: Option<PathBuf>) {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        self.paths = PathsConfig {
            config_file: base.join("config.toml"),
            db_file: base.join("facts.db"),
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Set up paths based on config file location
        let base = config_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        config.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            db_file: base.join("facts.db"),
            base_dir: base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_config_path())
    }

    /// Load configuration from a specific base directory, falling back to
    /// defaults if no config file exists yet
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.init_paths(base_dir);

        if config.paths.config_file.exists() {
            debug!("Loading config from {:?}", config.paths.config_file);
            let content = std::fs::read_to_string(&config.paths.config_file)?;
            let mut loaded: Config = toml::from_str(&content)?;
            loaded.paths = config.paths;
            config = loaded;
        } else {
            debug!("No config file found, using defaults");
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Check if petfacts is initialized (config and DB exist)
    pub fn is_initialized(&self) -> bool {
        self.paths.config_file.exists() && self.paths.db_file.exists()
    }

    /// Resolved path of the CSV report
    pub fn csv_path(&self) -> PathBuf {
        self.paths.base_dir.join(&self.report.csv_file)
    }

    /// Resolved path of the chart output directory
    pub fn chart_dir(&self) -> PathBuf {
        self.paths.base_dir.join(&self.report.chart_dir)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.providers.cat_url)
            .map_err(|e| Error::Config(format!("providers.cat_url is not a valid URL: {}", e)))?;
        url::Url::parse(&self.providers.dog_url)
            .map_err(|e| Error::Config(format!("providers.dog_url is not a valid URL: {}", e)))?;

        if self.providers.dog_batch_size == 0 {
            return Err(Error::Config(
                "providers.dog_batch_size must be positive".to_string(),
            ));
        }

        if self.fetch.attempt_multiplier == 0 {
            return Err(Error::Config(
                "fetch.attempt_multiplier must be positive".to_string(),
            ));
        }

        if self.report.top_words == 0 {
            return Err(Error::Config(
                "report.top_words must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fetch.attempt_multiplier, 20);
        assert_eq!(config.providers.dog_batch_size, 5);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));
        config.fetch.cat_count = 3;
        config.save().unwrap();

        let loaded = Config::load(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(loaded.fetch.cat_count, 3);
        assert_eq!(loaded.paths.db_file, tmp.path().join("facts.db"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = Config::default();
        config.providers.cat_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(config.fetch.cat_count, default_cat_count());
        assert_eq!(config.paths.base_dir, tmp.path());
    }
}
