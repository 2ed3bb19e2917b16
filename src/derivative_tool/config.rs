//! Logging and presentation settings, read from TOML.
//!
//! ```toml
//! log_level = "debug"
//! log_file = "derivplot.log"
//! chart_width = 1024
//! chart_height = 768
//! original_color = "blue"
//! derivative_color = "rgb(75, 192, 192)"
//! page_title = "Derivative calculator"
//! ```
//! Every key is optional. The sampling domain is fixed and has no key.

use crate::derivative_tool::chart::{ChartColors, DERIVATIVE_COLOR, ORIGINAL_COLOR};
use log::info;
use serde::Deserialize;
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// a value that parses but cannot be used
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Cannot read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Cannot parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// off, error, warn, info, debug or trace
    pub log_level: String,
    /// also write the log to this file
    pub log_file: Option<PathBuf>,
    pub chart_width: u32,
    pub chart_height: u32,
    pub original_color: String,
    pub derivative_color: String,
    pub page_title: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            log_level: "info".to_string(),
            log_file: None,
            chart_width: 800,
            chart_height: 600,
            original_color: ORIGINAL_COLOR.to_string(),
            derivative_color: DERIVATIVE_COLOR.to_string(),
            page_title: "Derivative calculator".to_string(),
        }
    }
}

impl ToolConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ToolConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("loaded config from {:?}", path);
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chart size must be positive, got {}x{}",
                self.chart_width, self.chart_height
            )));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        match self.log_level.to_lowercase().as_str() {
            "off" => Ok(LevelFilter::Off),
            "error" => Ok(LevelFilter::Error),
            "warn" => Ok(LevelFilter::Warn),
            "info" => Ok(LevelFilter::Info),
            "debug" => Ok(LevelFilter::Debug),
            "trace" => Ok(LevelFilter::Trace),
            other => Err(ConfigError::Invalid(format!(
                "log_level must be off, error, warn, info, debug or trace, got '{}'",
                other
            ))),
        }
    }

    pub fn chart_colors(&self) -> ChartColors {
        ChartColors {
            original: self.original_color.clone(),
            derivative: self.derivative_color.clone(),
        }
    }
}
