//! # Thermal Recorder Errors
//!
//! Error types shared by the thermal recorder configuration crates.
//!
//! - Uses `thiserror` for structured error definitions
//! - Validation messages are stable: hosts print them verbatim

use thiserror::Error;

/// Semantic rule violations in an otherwise well-formed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid window-start")]
    InvalidWindowStart,

    #[error("invalid window-end")]
    InvalidWindowEnd,

    #[error("window-end is set but window-start isn't")]
    WindowEndWithoutStart,

    #[error("window-start is set but window-end isn't")]
    WindowStartWithoutEnd
}

/// Recorder configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to decode {document} document: {reason}")]
    Decode {
        document: &'static str,
        reason: String
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String }
}

impl ConfigError {
    /// Returns the validation failure, if this error is one.
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(err) => Some(*err),
            _ => None
        }
    }
}

/// Device configuration store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open config store at {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("Failed to parse config store {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Failed to unmarshal key {key}: {reason}")]
    Unmarshal { key: String, reason: String }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_bare() {
        assert_eq!(
            ValidationError::InvalidWindowStart.to_string(),
            "invalid window-start"
        );
        assert_eq!(
            ValidationError::InvalidWindowEnd.to_string(),
            "invalid window-end"
        );
        assert_eq!(
            ValidationError::WindowEndWithoutStart.to_string(),
            "window-end is set but window-start isn't"
        );
        assert_eq!(
            ValidationError::WindowStartWithoutEnd.to_string(),
            "window-start is set but window-end isn't"
        );
    }

    #[test]
    fn test_config_error_validation_is_transparent() {
        let err = ConfigError::from(ValidationError::WindowEndWithoutStart);
        assert_eq!(err.to_string(), "window-end is set but window-start isn't");
        assert_eq!(
            err.as_validation(),
            Some(ValidationError::WindowEndWithoutStart)
        );
    }

    #[test]
    fn test_decode_error_names_document() {
        let err = ConfigError::Decode {
            document: "behaviour",
            reason: "motion.temp-thresh: invalid type".to_string()
        };
        assert!(err.to_string().contains("behaviour"));
        assert!(err.to_string().contains("motion.temp-thresh"));
        assert_eq!(err.as_validation(), None);
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Unmarshal {
            key: "lepton".to_string(),
            reason: "bad type".to_string()
        };
        assert_eq!(err.to_string(), "Failed to unmarshal key lepton: bad type");
    }
}
