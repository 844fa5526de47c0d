use std::env;
use std::fmt;

use crate::forms::ColorScheme;

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub form: FormConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let color_scheme = match env::var("APP_COLOR_SCHEME") {
            Ok(raw) => ColorScheme::parse(&raw).ok_or(ConfigError::InvalidColorScheme(raw))?,
            Err(_) => ColorScheme::default(),
        };

        let output = match env::var("APP_OUTPUT") {
            Ok(raw) => OutputFormat::parse(&raw).ok_or(ConfigError::InvalidOutputFormat(raw))?,
            Err(_) => OutputFormat::default(),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            form: FormConfig {
                color_scheme,
                output,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for the interactive form surface.
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub color_scheme: ColorScheme,
    pub output: OutputFormat,
}

/// JSON layout used when a submission is written to the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" | "json" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidColorScheme(String),
    InvalidOutputFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidColorScheme(value) => {
                write!(f, "APP_COLOR_SCHEME must be 'light' or 'dark' (found '{value}')")
            }
            ConfigError::InvalidOutputFormat(value) => {
                write!(f, "APP_OUTPUT must be 'pretty' or 'compact' (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serializes tests that mutate the process environment.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    use std::sync::{Mutex, OnceLock};

    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(()))
}
