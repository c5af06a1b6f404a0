//! Domain error types

use thiserror::Error;

/// Error when an unknown importance level is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid importance: \"{input}\". Valid levels are: urgent, high, medium, low")]
pub struct InvalidImportanceError {
    pub input: String,
}

/// Error when an unknown category is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid category: \"{input}\". Valid categories are: alarm, reminder, message, call, event, progress, social, error, status")]
pub struct InvalidCategoryError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_error_lists_valid_levels() {
        let err = InvalidImportanceError {
            input: "loud".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("loud"));
        assert!(msg.contains("urgent"));
    }

    #[test]
    fn validation_error_names_key() {
        let err = ConfigError::ValidationError {
            key: "backend".to_string(),
            message: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid config value for 'backend': nope");
    }
}
