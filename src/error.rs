//! Error types for the pigment_match library

use thiserror::Error;

/// Result type alias for pigment_match operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error taxonomy for color matching operations
///
/// Empty catalogs and empty inventory selections are not errors: ranking
/// yields an empty list and recipe search yields `None`.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Hex color string does not match `#RRGGBB`
    #[error("Invalid hex color: {input:?} (expected #RRGGBB)")]
    InvalidHex { input: String },

    /// Invalid configuration or call parameter
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Configuration or catalog file could not be read or written
    #[error("I/O error: {message}")]
    ConfigIo {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration or catalog content could not be (de)serialized
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MatchError {
    /// Create an invalid hex error for the given input
    pub fn invalid_hex(input: impl Into<String>) -> Self {
        Self::InvalidHex {
            input: input.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create an I/O error with context
    pub fn io<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigIo {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a serialization error with context
    pub fn serialization<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if the caller can recover by falling back to a previous value
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MatchError::InvalidHex { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            MatchError::InvalidHex { input } => {
                format!("\"{}\" is not a valid color. Use the form #RRGGBB.", input)
            }
            MatchError::InvalidParameter { parameter, .. } => {
                format!("The setting \"{}\" has an unsupported value.", parameter)
            }
            MatchError::ConfigIo { .. } => {
                "Could not read or write the file. Please check the path and permissions.".to_string()
            }
            MatchError::Serialization { .. } => {
                "The file contents are not in the expected format.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_hex_display() {
        let err = MatchError::invalid_hex("#12345");
        assert_eq!(err.to_string(), "Invalid hex color: \"#12345\" (expected #RRGGBB)");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = MatchError::io("reading catalog.json", source);
        assert!(err.source().is_some());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_user_message_mentions_parameter() {
        let err = MatchError::invalid_parameter("pair_shortlist", 0);
        assert!(err.user_message().contains("pair_shortlist"));
    }
}
