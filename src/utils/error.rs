use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Completion error: {message}")]
    CompletionError { message: String },

    #[error("Browser automation error: {message}")]
    BrowserError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    External,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoutError::HttpError(_) | ScoutError::UrlError(_) => ErrorCategory::Network,
            ScoutError::CsvError(_) | ScoutError::SerializationError(_) => ErrorCategory::Data,
            ScoutError::ConfigError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScoutError::ValidationError { .. } => ErrorCategory::Input,
            ScoutError::CompletionError { .. } | ScoutError::BrowserError { .. } => {
                ErrorCategory::External
            }
            ScoutError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::External => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoutError::HttpError(_) => "Check network connectivity and the remote endpoint",
            ScoutError::UrlError(_) => "Use an absolute http(s) URL",
            ScoutError::CsvError(_) => "Check that the catalog CSV has class, item and description columns",
            ScoutError::SerializationError(_) => "The remote service returned unexpected JSON; retry later",
            ScoutError::ConfigError { .. }
            | ScoutError::InvalidConfigValueError { .. } => "Fix the configuration value and restart",
            ScoutError::MissingConfigError { .. } => "Provide the missing setting in the config file or environment",
            ScoutError::ValidationError { .. } => "Describe the services your business provides",
            ScoutError::CompletionError { .. } => "Check the GOOGLE_AI_API_KEY and model name",
            ScoutError::BrowserError { .. } => "Make sure a WebDriver server (e.g. chromedriver) is running",
            ScoutError::IoError(_) => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoutError::ValidationError { message } => message.clone(),
            ScoutError::MissingConfigError { field } => {
                format!("Missing setting '{}'", field)
            }
            ScoutError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    /// 請求層唯一的輸入錯誤
    pub fn missing_services() -> Self {
        ScoutError::ValidationError {
            message: "No services provided.".to_string(),
        }
    }

    pub fn is_input_fault(&self) -> bool {
        matches!(self, ScoutError::ValidationError { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
