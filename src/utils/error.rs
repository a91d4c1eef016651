use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Cannot read input table '{path}': {message}")]
    FileAccess { path: String, message: String },

    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn file_access(path: impl Into<String>, message: impl ToString) -> Self {
        ImportError::FileAccess {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::FileAccess { .. } | ImportError::CsvError(_) => ErrorCategory::Input,
            ImportError::ApiError(_) => ErrorCategory::Network,
            ImportError::IoError(_) | ImportError::SerializationError(_) => ErrorCategory::Output,
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. }
            | ImportError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::FileAccess { .. } => {
                "Check that the input file exists and is a .xlsx/.xls/.ods/.csv table with a header row"
            }
            ImportError::CsvError(_) => "Make sure the CSV file is UTF-8 and has a header row",
            ImportError::ApiError(_) => "Check VITE_SUPABASE_URL and your network connection",
            ImportError::IoError(_) => "Check write permissions for the working directory",
            ImportError::SerializationError(_) => "Inspect the offending row values in the input table",
            ImportError::MissingConfigError { .. } => {
                "Check the --config path, or drop the flag to run on defaults"
            }
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::ConfigValidationError { .. } => {
                "Review the command-line flags, the TOML settings file and the .env file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::FileAccess { path, .. } => format!("Could not open input table '{}'", path),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_access_is_fatal_input_error() {
        let err = ImportError::file_access("missing.xlsx", "No such file or directory");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("missing.xlsx"));
        assert_eq!(
            err.user_friendly_message(),
            "Could not open input table 'missing.xlsx'"
        );
    }

    #[test]
    fn config_errors_share_a_category() {
        let err = ImportError::InvalidConfigValueError {
            field: "import.progress_interval".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("TOML"));

        let missing = ImportError::MissingConfigError {
            field: "settings file 'import.toml'".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        assert_eq!(missing.severity(), ErrorSeverity::High);
        assert!(missing.recovery_suggestion().contains("--config"));
    }
}
