use crate::presenter::{CapacityBands, PresenterConfig};
use crate::workflows::import::DEFAULT_MEETINGS_SHEET;
use std::env;
use std::fmt;

/// Top-level configuration for a reporting run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub import: ImportConfig,
    pub presenter: PresenterConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("REPORT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let meetings_sheet = env::var("REPORT_MEETINGS_SHEET")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_MEETINGS_SHEET.to_string());

        let defaults = PresenterConfig::default();
        let decimals = parse_var(
            "REPORT_DECIMALS",
            defaults.decimals,
            ConfigError::InvalidDecimals,
        )?;
        let bar_width =
            parse_var("REPORT_BAR_WIDTH", defaults.bar_width, ConfigError::InvalidBarWidth)?;
        if bar_width == 0 {
            return Err(ConfigError::InvalidBarWidth);
        }

        let on_target = parse_var(
            "REPORT_BAND_ON_TARGET",
            defaults.bands.on_target,
            ConfigError::InvalidBand,
        )?;
        let over = parse_var("REPORT_BAND_OVER", defaults.bands.over, ConfigError::InvalidBand)?;
        if !(on_target > 0.0 && on_target <= over && over.is_finite()) {
            return Err(ConfigError::InvalidBand);
        }

        let workstream_order = env::var("REPORT_WORKSTREAM_ORDER")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.workstream_order);

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            import: ImportConfig { meetings_sheet },
            presenter: PresenterConfig {
                decimals,
                bar_width,
                bands: CapacityBands { on_target, over },
                workstream_order,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    key: &str,
    default: T,
    invalid: ConfigError,
) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| invalid),
        Err(_) => Ok(default),
    }
}

/// Source options for the loader.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Sheet holding the meeting log when the meeting source is a workbook.
    pub meetings_sheet: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDecimals,
    InvalidBarWidth,
    InvalidBand,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDecimals => {
                write!(f, "REPORT_DECIMALS must be a non-negative integer")
            }
            ConfigError::InvalidBarWidth => {
                write!(f, "REPORT_BAR_WIDTH must be a positive integer")
            }
            ConfigError::InvalidBand => write!(
                f,
                "REPORT_BAND_ON_TARGET and REPORT_BAND_OVER must satisfy 0 < on-target <= over"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
