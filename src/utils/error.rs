use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Voucher '{voucher_id}' has an invalid expiry date: '{value}'")]
    InvalidDate { voucher_id: String, value: String },

    #[error("Unsupported voucher source format: {path}")]
    UnsupportedSourceFormat { path: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalyticsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::CsvError(_) | Self::SerializationError(_) | Self::UnsupportedSourceFormat { .. } => {
                ErrorCategory::Data
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::InvalidDate { .. } | Self::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data | ErrorCategory::Validation => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the voucher file exists and is readable",
            Self::CsvError(_) => "Make sure the CSV has a header row with voucher field names",
            Self::SerializationError(_) => "Make sure the file holds a JSON array of vouchers",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the highlighted configuration value and run again"
            }
            Self::MissingConfigError { .. } => {
                "Provide the value in the TOML config or as a command line flag"
            }
            Self::InvalidDate { .. } => "Expiry dates must use the YYYY-MM-DD format",
            Self::UnsupportedSourceFormat { .. } => "Use a .json or .csv voucher file",
            Self::ValidationError { .. } => "Correct the voucher record and reload",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Data => format!("Could not read voucher data: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Validation => format!("Invalid voucher: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_is_medium_validation_error() {
        let err = AnalyticsError::InvalidDate {
            voucher_id: "v1".to_string(),
            value: "31/12/2025".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("31/12/2025"));
        assert!(err.user_friendly_message().starts_with("Invalid voucher"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: AnalyticsError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();

        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
