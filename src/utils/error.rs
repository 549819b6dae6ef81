use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Content error in {resource}: {message}")]
    ContentError { resource: String, message: String },

    #[error("Catalog validation failed: {message}")]
    CatalogValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::IoError(_) => ErrorCategory::Io,
            SiteError::SerializationError(_)
            | SiteError::CsvError(_)
            | SiteError::ContentError { .. }
            | SiteError::CatalogValidationError { .. } => ErrorCategory::Data,
            SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SiteError::IoError(_) => ErrorSeverity::Critical,
            SiteError::ContentError { .. } | SiteError::CatalogValidationError { .. } => {
                ErrorSeverity::Medium
            }
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the content and output directories exist and are writable",
            ErrorCategory::Data => "Fix the JSON content files (areas.json, services.json, blog/index.json)",
            ErrorCategory::Configuration => "Check the command line flags or the TOML config file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::IoError(e) => format!("Could not read or write a file: {}", e),
            SiteError::SerializationError(e) => format!("Content is not valid JSON: {}", e),
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
