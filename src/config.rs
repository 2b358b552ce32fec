use jusmile_core::SourceOverrides;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/ju-smile-calorie-app/";

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding reference.json, the offline cache, day logs and settings
    pub data_dir: ConfigValue<PathBuf>,
    /// Base URL the reference resources are resolved against
    pub base_url: ConfigValue<String>,
    /// Check for new reference data before commands that read it
    pub auto_sync: ConfigValue<bool>,
    /// Per-resource location overrides
    pub sources: SourceOverrides,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    base_url: Option<String>,
    auto_sync: Option<bool>,
    sources: Option<SourceOverrides>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut base_url = ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default);
        let mut auto_sync = ConfigValue::new(false, ConfigSource::Default);
        let mut sources = SourceOverrides::default();
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Relative to the config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(url) = file_config.base_url {
                base_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(enabled) = file_config.auto_sync {
                auto_sync = ConfigValue::new(enabled, ConfigSource::File);
            }
            if let Some(file_sources) = file_config.sources {
                sources = file_sources;
            }
        }

        if let Ok(dir) = std::env::var("JUSMILE_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("JUSMILE_BASE_URL") {
            base_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(value) = std::env::var("JUSMILE_AUTO_SYNC") {
            let enabled = matches!(value.trim(), "1" | "true" | "yes" | "on");
            auto_sync = ConfigValue::new(enabled, ConfigSource::Environment);
        }
        for (var, slot) in [
            ("JUSMILE_SRC_FOOD", &mut sources.precise_items),
            ("JUSMILE_SRC_UNIT", &mut sources.unit_conversions),
            ("JUSMILE_SRC_TYPE", &mut sources.type_macros),
            ("JUSMILE_SRC_MET", &mut sources.exercise_intensities),
        ] {
            if let Ok(value) = std::env::var(var) {
                *slot = Some(value);
            }
        }

        Ok(Self {
            data_dir,
            base_url,
            auto_sync,
            sources,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/jusmile/
    /// - macOS: ~/Library/Application Support/jusmile/
    /// - Windows: %APPDATA%/jusmile/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jusmile")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/jusmile/
    /// - macOS: ~/Library/Application Support/jusmile/
    /// - Windows: %APPDATA%/jusmile/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jusmile")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }

    pub fn reference_path(&self) -> PathBuf {
        self.data_dir.value.join("reference.json")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.value.join("cache")
    }

    pub fn days_dir(&self) -> PathBuf {
        self.data_dir.value.join("days")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.value.join("settings.json")
    }

    pub fn combos_path(&self) -> PathBuf {
        self.data_dir.value.join("combos.json")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
