//! Error types for command registration and dispatch.
//!
//! Errors fall into three groups:
//!
//! | Category | Variants | Raised |
//! |----------|----------|--------|
//! | Caller | `InvalidDefinition`, `Core` | While commands are defined, before any script is written |
//! | Protocol | `Protocol`, `BlockUnavailable` | On an execution pass whose argv does not match the registered commands |
//! | System | `Config`, `Io` | Reading configuration or writing to Kakoune |
//!
//! Failures returned by a block body are not represented here: the router
//! turns them into a `fail` line for Kakoune and the process exits normally.

/// Registration and dispatch errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ==================== Caller ====================
    /// Command definition rejected at registration time
    #[error("invalid command definition: {reason}")]
    InvalidDefinition {
        /// What is wrong with the definition
        reason: String,
    },

    /// Name validation failed
    #[error(transparent)]
    Core(#[from] kakbridge_core::Error),

    // ==================== Protocol ====================
    /// Malformed re-invocation arguments
    #[error("protocol violation: {reason}")]
    Protocol {
        /// What was wrong with the arguments
        reason: String,
    },

    /// Block index outside the command's registered blocks.
    ///
    /// The generated script and the running binary disagree about the
    /// command's blocks, usually because the binary was rebuilt without
    /// re-running the definition pass.
    #[error("{command} block unavailable: {index} (command has {available} blocks)")]
    BlockUnavailable {
        /// Command being executed
        command: String,
        /// Index received on argv
        index: usize,
        /// Number of registered blocks
        available: usize,
    },

    // ==================== System ====================
    /// Configuration could not be loaded
    #[error("configuration error: {reason}")]
    Config {
        /// Underlying problem
        reason: String,
    },

    /// Writing to Kakoune failed
    #[error("I/O error: {reason}")]
    Io {
        /// Underlying problem
        reason: String,
    },
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io {
            reason: e.to_string(),
        }
    }
}

impl From<kakbridge_core::CommandNameError> for Error {
    fn from(e: kakbridge_core::CommandNameError) -> Self {
        Error::Core(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_unavailable_names_command_and_index() {
        let err = Error::BlockUnavailable {
            command: "save".to_string(),
            index: 3,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("save"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { ref reason } if reason.contains("pipe closed")));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: Error = kakbridge_core::CommandNameError::Empty.into();
        assert_eq!(err.to_string(), "invalid command name: command name is empty");
    }
}
