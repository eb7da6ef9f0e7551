use std::{env, fs};
use std::time::Duration;
use log::info;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::manager_forecast::units::UnitSystem;
use crate::manager_forecast::window::TimezoneSource;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Debug)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[serde_as]
#[derive(Deserialize, Debug)]
pub struct OwmConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(rename = "timeout_secs", default = "default_timeout")]
    pub timeout: Duration,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneMode {
    #[default]
    City,
    Local,
    Fixed,
}

#[derive(Deserialize, Debug)]
pub struct ForecastConfig {
    #[serde(default)]
    pub default_unit: UnitSystem,
    #[serde(default = "default_lang")]
    pub default_lang: String,
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default)]
    pub timezone: TimezoneMode,
    #[serde(default)]
    pub fixed_offset_secs: i32,
}

impl ForecastConfig {
    /// Returns where day boundaries of a page are to be taken from
    pub fn timezone_source(&self) -> TimezoneSource {
        match self.timezone {
            TimezoneMode::City => TimezoneSource::City,
            TimezoneMode::Local => TimezoneSource::LegacyLocal,
            TimezoneMode::Fixed => TimezoneSource::Fixed(self.fixed_offset_secs),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub web_server: WebServer,
    pub owm: OwmConfig,
    pub forecast: ForecastConfig,
    pub general: General,
}

/// Returns the configuration and sets up logging
///
/// The config file is the first command line argument, else the CONFIG_PATH environment
/// variable, else config.toml in the working directory.
pub fn config() -> Result<Config, ConfigError> {
    let path = env::args().nth(1)
        .or_else(|| env::var("CONFIG_PATH").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = load_config(&path)?;
    setup_logger(&config.general.log_path, &config.general.log_level, config.general.log_to_stdout)?;

    info!("configuration loaded from {}", path);

    Ok(config)
}

/// Loads and checks the configuration file
///
/// # Arguments
///
/// * 'config_path' - path to the toml config file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.forecast.max_samples == 0 {
        return Err(ConfigError::from("forecast.max_samples must be at least 1"));
    }
    if config.forecast.pages == 0 {
        return Err(ConfigError::from("forecast.pages must be at least 1"));
    }
    if let UnitSystem::Unknown(code) = &config.forecast.default_unit {
        return Err(ConfigError(format!("unknown forecast.default_unit: {}", code)));
    }

    Ok(config)
}

fn default_base_url() -> String { "https://api.openweathermap.org".to_string() }
fn default_timeout() -> Duration { Duration::from_secs(30) }
fn default_lang() -> String { "en".to_string() }
fn default_max_samples() -> usize { 6 }
fn default_pages() -> u32 { 6 }
fn default_log_level() -> String { "info".to_string() }
