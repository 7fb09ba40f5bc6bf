use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("GraphQL error: {message}")]
    GraphqlError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Task '{task}' failed: {message}")]
    TaskError { task: String, message: String },
}

pub type Result<T> = std::result::Result<T, CrmError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Io,
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CrmError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CrmError::ApiError(_) | CrmError::GraphqlError { .. } => ErrorCategory::Network,
            CrmError::SerializationError(_) => ErrorCategory::Data,
            CrmError::ConfigError { .. }
            | CrmError::ConfigValidationError { .. }
            | CrmError::InvalidConfigValueError { .. }
            | CrmError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CrmError::IoError(_) => ErrorCategory::Io,
            CrmError::TaskError { .. } => ErrorCategory::Task,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient by nature, the next scheduled run may succeed
            CrmError::ApiError(_) => ErrorSeverity::Medium,
            CrmError::GraphqlError { .. } => ErrorSeverity::High,
            CrmError::SerializationError(_) => ErrorSeverity::High,
            CrmError::ConfigError { .. }
            | CrmError::ConfigValidationError { .. }
            | CrmError::InvalidConfigValueError { .. }
            | CrmError::MissingConfigError { .. } => ErrorSeverity::Critical,
            CrmError::IoError(_) => ErrorSeverity::Critical,
            CrmError::TaskError { .. } => ErrorSeverity::High,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::Medium)
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CrmError::ApiError(_) => {
                "Check that the CRM GraphQL endpoint is reachable and retry".to_string()
            }
            CrmError::GraphqlError { .. } => {
                "Inspect the GraphQL query against the CRM schema".to_string()
            }
            CrmError::SerializationError(_) => {
                "The CRM API returned an unexpected payload shape; verify the API version"
                    .to_string()
            }
            CrmError::ConfigError { .. } | CrmError::ConfigValidationError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
            CrmError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            CrmError::MissingConfigError { field } => {
                format!("Provide '{}' via the config file or CLI flag", field)
            }
            CrmError::IoError(_) => {
                "Check that the log directory exists and is writable".to_string()
            }
            CrmError::TaskError { .. } => {
                "Check the task logs for details and rerun the task manually".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CrmError::ApiError(e) => format!("Could not reach the CRM API: {}", e),
            CrmError::GraphqlError { message } => {
                format!("The CRM API rejected the request: {}", message)
            }
            CrmError::SerializationError(_) => {
                "The CRM API response could not be understood".to_string()
            }
            CrmError::ConfigError { message } => format!("Configuration problem: {}", message),
            CrmError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            CrmError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for '{}': {}", value, field, reason),
            CrmError::MissingConfigError { field } => {
                format!("Required configuration '{}' is missing", field)
            }
            CrmError::IoError(e) => format!("Could not write the task log: {}", e),
            CrmError::TaskError { task, message } => {
                format!("Maintenance task '{}' failed: {}", task, message)
            }
        }
    }
}
