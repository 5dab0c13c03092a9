use anyhow::Context;
use serde::{Deserialize, Serialize};
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
}

/// How the line-ending style of an opened file is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingPreference {
    /// Detect from the file contents.
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEndingPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEndingPreference::Auto => "auto",
            LineEndingPreference::Lf => "lf",
            LineEndingPreference::Crlf => "crlf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub line_ending: LineEndingPreference,
    /// Maximum characters shown when previewing a selection.
    pub preview_chars: usize,
    /// Where saved character reports go. Defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_ending: LineEndingPreference::Auto,
            preview_chars: 40,
            report_dir: None,
        }
    }
}

impl Config {
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

        // Expand shell variables and tilde in the report directory
        config.report_dir = config
            .report_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The config file if present, otherwise defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file {}", config_path.display()))
    }

    /// Write to [`Config::config_path`], returning the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)?;
        Ok(config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/offset-lens");
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
