use crate::config::models::ServerConfig;

/// Validation result type alias
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, thiserror::Error, Clone)]
pub enum ValidationError {
    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

/// Server configuration validator
pub struct ServerConfigValidator;

impl ServerConfigValidator {
    /// Validate the entire server configuration
    pub fn validate(config: &ServerConfig) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if config.host.is_empty() {
            errors.push(ValidationError::InvalidField {
                field: "host".to_string(),
                message: "bind host must not be empty".to_string(),
            });
        }

        if config.port == 0 {
            errors.push(ValidationError::InvalidField {
                field: "port".to_string(),
                message: "bind port must be between 1 and 65535".to_string(),
            });
        }

        if config.query_timeout_secs == 0 {
            errors.push(ValidationError::InvalidField {
                field: "query_timeout_secs".to_string(),
                message: "engine socket timeout must be at least 1 second".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            let message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(ValidationError::ValidationFailed { message })
        }
    }
}
