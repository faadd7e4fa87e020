use thiserror::Error;

#[derive(Error, Debug)]
pub enum TownError {
    #[error("Not in stock (current stock: {stock})")]
    OutOfStock { stock: i32 },

    #[error("Propagation of '{event}' exceeded the maximum depth of {max_depth}")]
    PropagationTooDeep { event: &'static str, max_depth: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Business,
    Propagation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl TownError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TownError::OutOfStock { .. } => ErrorCategory::Business,
            TownError::PropagationTooDeep { .. } => ErrorCategory::Propagation,
            TownError::ConfigValidationError { .. }
            | TownError::InvalidConfigValueError { .. }
            | TownError::MissingConfigError { .. } => ErrorCategory::Configuration,
            TownError::IoError(_) | TownError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Business => ErrorSeverity::Medium,
            ErrorCategory::Propagation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TownError::OutOfStock { .. } => {
                "Supply the grocery store before selling or cooking food".to_string()
            }
            TownError::PropagationTooDeep { .. } => {
                "Check the propagation rules for a cycle, or raise mediator.max_depth".to_string()
            }
            TownError::IoError(_) => "Check that the file exists and is readable".to_string(),
            TownError::SerializationError(_) => "Report output could not be encoded".to_string(),
            TownError::ConfigValidationError { field, .. }
            | TownError::InvalidConfigValueError { field, .. }
            | TownError::MissingConfigError { field } => {
                format!("Fix '{}' in the scenario file", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TownError::OutOfStock { .. } => "The grocery store has nothing left to sell".to_string(),
            TownError::PropagationTooDeep { event, .. } => {
                format!("Business updates kept triggering each other ({})", event)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TownError>;
