use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

pub const DEFAULT_PROBATION_ALERT_DAYS: u32 = 15;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub reporting: ReportingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = PathBuf::from(env::var("APP_DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let export_dir = PathBuf::from(env::var("APP_EXPORT_DIR").unwrap_or_else(|_| ".".to_string()));

        let probation_alert_days = match env::var("APP_PROBATION_ALERT_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidAlertDays { value: raw })?,
            Err(_) => DEFAULT_PROBATION_ALERT_DAYS,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig { data_dir },
            reporting: ReportingConfig {
                export_dir,
                probation_alert_days,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the persisted collections live.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Probation report output and thresholds.
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    pub export_dir: PathBuf,
    pub probation_alert_days: u32,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidAlertDays { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAlertDays { value } => write!(
                f,
                "APP_PROBATION_ALERT_DAYS must be a non-negative integer (found '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
