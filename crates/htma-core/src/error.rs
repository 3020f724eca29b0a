//! Error types for HTMA persona contracts.

use thiserror::Error;

/// Result type alias using htma-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for persona operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persona not found (neither built-in nor stored)
    #[error("Persona not found: {0}")]
    PersonaNotFound(String),

    /// Operation rejected (predefined persona, not owner, persona in use)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request failed shape or range validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("test resource".to_string());
        assert_eq!(err.to_string(), "Not found: test resource");
    }

    #[test]
    fn test_error_display_persona_not_found() {
        let err = Error::PersonaNotFound("team-leader-x".to_string());
        assert_eq!(err.to_string(), "Persona not found: team-leader-x");
    }

    #[test]
    fn test_error_display_forbidden() {
        let err = Error::Forbidden("predefined persona".to_string());
        assert_eq!(err.to_string(), "Forbidden: predefined persona");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("name: must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: name: must not be empty");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("unknown default persona".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown default persona");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
