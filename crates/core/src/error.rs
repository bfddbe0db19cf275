//! Error types for kakbridge-core
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::name::CommandNameError;
use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating names or reading Kakoune text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Variable name is not usable as the suffix of a `kak_*` key
    #[error("invalid variable name '{name}': {reason}")]
    InvalidVarName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Command name failed validation
    #[error("invalid command name: {0}")]
    InvalidCommandName(#[from] CommandNameError),

    /// A quoted word was not closed before the end of input
    #[error("unterminated {delimiter} quote starting at byte {position}")]
    UnterminatedQuote {
        /// The opening delimiter
        delimiter: char,
        /// Byte offset of the opening delimiter
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_var_name() {
        let err = Error::InvalidVarName {
            name: "kak_buffile".to_string(),
            reason: "must not carry the kak_ prefix".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("kak_buffile"));
        assert!(msg.contains("prefix"));
    }

    #[test]
    fn test_error_from_command_name_error() {
        let err: Error = CommandNameError::Empty.into();
        assert!(matches!(err, Error::InvalidCommandName(CommandNameError::Empty)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_error_display_unterminated_quote() {
        let err = Error::UnterminatedQuote {
            delimiter: '"',
            position: 4,
        };
        assert_eq!(err.to_string(), "unterminated \" quote starting at byte 4");
    }
}
