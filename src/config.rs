//! Runtime configuration read from the environment (and `.env`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::api::DolarApiClient;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Where and how big the exported chart is
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dolar_chart.png"),
            width: 1024,
            height: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dolar_api_url: String,
    pub historical_api_url: String,
    pub chart: ChartSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dolar_api_url: DolarApiClient::DEFAULT_DOLAR_URL.to_string(),
            historical_api_url: DolarApiClient::DEFAULT_HISTORICAL_URL.to_string(),
            chart: ChartSettings::default(),
        }
    }
}

impl Config {
    /// Build from process environment; unset variables fall back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Config {
            dolar_api_url: get("DOLAR_API_URL").unwrap_or(defaults.dolar_api_url),
            historical_api_url: get("HISTORICAL_API_URL").unwrap_or(defaults.historical_api_url),
            chart: ChartSettings {
                output: get("CHART_OUTPUT")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.chart.output),
                width: parse_dimension("CHART_WIDTH", get("CHART_WIDTH"), defaults.chart.width)?,
                height: parse_dimension("CHART_HEIGHT", get("CHART_HEIGHT"), defaults.chart.height)?,
            },
        })
    }
}

fn parse_dimension(
    name: &'static str,
    value: Option<String>,
    default: u32,
) -> Result<u32, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };

    let parsed = value.trim().parse::<u32>();
    match parsed {
        Ok(0) => Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::InvalidValue {
            name,
            value,
            reason: e.to_string(),
        }),
    }
}
