use crate::config::ConfigError;
use crate::earnings::EarningError;
use crate::itinerary::CalculatorError;
use crate::reference::ReferenceDataError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Reference(ReferenceDataError),
    Calculator(CalculatorError),
    Earning(EarningError),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl AppError {
    /// Errors caused by the caller's input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Calculator(_) | AppError::Earning(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Reference(err) => write!(f, "reference data error: {}", err),
            AppError::Calculator(err) => write!(f, "{}", err),
            AppError::Earning(err) => write!(f, "{}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Reference(err) => Some(err),
            AppError::Calculator(err) => Some(err),
            AppError::Earning(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<ReferenceDataError> for AppError {
    fn from(value: ReferenceDataError) -> Self {
        Self::Reference(value)
    }
}

impl From<CalculatorError> for AppError {
    fn from(value: CalculatorError) -> Self {
        Self::Calculator(value)
    }
}

impl From<EarningError> for AppError {
    fn from(value: EarningError) -> Self {
        Self::Earning(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
