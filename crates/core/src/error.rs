//! Error types for Andmore
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for Andmore configuration and shared services
#[derive(Error, Debug)]
pub enum AndmoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for Andmore operations
pub type Result<T> = std::result::Result<T, AndmoreError>;

impl AndmoreError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AndmoreError::Io(e) => format!("File operation failed: {}", e),
            AndmoreError::Config(msg) => format!("Configuration error: {}", msg),
            AndmoreError::TomlParse(e) => format!("Invalid configuration file: {}", e),
            AndmoreError::NotFound(msg) => format!("Not found: {}", msg),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let err = AndmoreError::Config("missing sdk".into());
        assert_eq!(err.user_message(), "Configuration error: missing sdk");

        let err = AndmoreError::NotFound("config.toml".into());
        assert_eq!(err.to_string(), "Not found: config.toml");
    }
}
