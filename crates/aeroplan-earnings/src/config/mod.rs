use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the calculator.
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

/// How itinerary results are printed by command-line hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidOutputFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub reference: ReferenceConfig,
    pub output: OutputFormat,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data_dir = match env::var("AEROPLAN_REFERENCE_DIR") {
            Ok(raw) if !raw.trim().is_empty() => {
                let path = PathBuf::from(raw.trim());
                if !path.is_dir() {
                    return Err(ConfigError::InvalidReferenceDir { path });
                }
                Some(path)
            }
            _ => None,
        };

        let output = match env::var("AEROPLAN_OUTPUT") {
            Ok(raw) => OutputFormat::parse(&raw)?,
            Err(_) => OutputFormat::Table,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            reference: ReferenceConfig { data_dir },
            output,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where airport, country, and published distance tables come from.
///
/// `None` selects the datasets compiled into the crate.
#[derive(Debug, Clone, Default)]
pub struct ReferenceConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidReferenceDir { path: PathBuf },
    InvalidOutputFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReferenceDir { path } => write!(
                f,
                "AEROPLAN_REFERENCE_DIR must point to an existing directory (got {})",
                path.display()
            ),
            ConfigError::InvalidOutputFormat { value } => {
                write!(f, "AEROPLAN_OUTPUT must be 'table' or 'json' (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("AEROPLAN_REFERENCE_DIR");
        env::remove_var("AEROPLAN_OUTPUT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.reference.data_dir.is_none());
        assert_eq!(config.output, OutputFormat::Table);
    }

    #[test]
    fn rejects_missing_reference_directory() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AEROPLAN_REFERENCE_DIR", "./definitely-not-a-directory");
        let error = AppConfig::load().expect_err("missing directory is rejected");
        assert!(matches!(error, ConfigError::InvalidReferenceDir { .. }));
        reset_env();
    }

    #[test]
    fn parses_output_format_and_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AEROPLAN_OUTPUT", "JSON");
        env::set_var("APP_ENV", "ci");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.environment, AppEnvironment::Test);

        env::set_var("AEROPLAN_OUTPUT", "html");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidOutputFormat { .. })
        ));
        reset_env();
    }
}
