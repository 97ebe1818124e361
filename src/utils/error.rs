use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Token signing failed: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    // 以下訊息會直接出現在 /sync 回應中，保留原有的西班牙文措辭
    #[error("{message}")]
    ConfigError { message: String },

    #[error("{field} no configurado")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("{message}")]
    NotFoundError { message: String },

    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 附在失敗結果上的錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Configuration,
    Validation,
    NotFound,
    Upstream,
    Internal,
}

impl SyncError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingConfigError {
            field: field.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::JwtError(_)
            | Self::UrlError(_) => ErrorCategory::Configuration,
            Self::ValidationError { .. } | Self::CsvError(_) => ErrorCategory::Validation,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::HttpError(_) | Self::UpstreamError { .. } => ErrorCategory::Upstream,
            Self::IoError(_) | Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the environment variables or the .env file",
            ErrorCategory::Validation => "Check the format of the source file",
            ErrorCategory::NotFound => "Check that the source folder contains Costos_MM_YYYY.csv files",
            ErrorCategory::Upstream => "The remote service failed; the next scheduled run will retry",
            ErrorCategory::Internal => "Inspect the logs for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
