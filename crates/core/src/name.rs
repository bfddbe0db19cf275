//! Command names.
//!
//! A command name is the only identity shared between the definition pass
//! and later execution passes: it is written into the generated
//! `define-command` script and comes back as the first argument of every
//! re-invocation.
//!
//! Names are written unquoted after `define-command` switches, so they must
//! be 1-256 characters of `[A-Za-z0-9_-]`, and a leading `-` would be read
//! as a switch.

use std::fmt;

/// Maximum length of a command name
pub const MAX_COMMAND_NAME_LENGTH: usize = 256;

/// Validated Kakoune command name, e.g. `save` or `lsp-hover`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandName(String);

/// Why a command name was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandNameError {
    /// Name is empty
    Empty,
    /// Name is longer than [`MAX_COMMAND_NAME_LENGTH`] bytes
    TooLong {
        /// Length of the name in bytes
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
    /// Name contains a character Kakoune would split or expand
    InvalidChar {
        /// The offending character
        char: char,
        /// Character offset in the name
        position: usize,
    },
    /// Name starts with `-`, which `define-command` parses as a switch
    InvalidStart {
        /// The first character
        char: char,
    },
}

impl fmt::Display for CommandNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandNameError::Empty => f.write_str("command name is empty"),
            CommandNameError::TooLong { length, max } => {
                write!(f, "command name is {} bytes long, limit is {}", length, max)
            }
            CommandNameError::InvalidChar { char, position } => write!(
                f,
                "command name has {:?} at offset {}; use letters, digits, '-' or '_'",
                char, position
            ),
            CommandNameError::InvalidStart { char } => {
                write!(f, "command name cannot start with {:?}", char)
            }
        }
    }
}

impl std::error::Error for CommandNameError {}

impl CommandName {
    /// Validate and wrap `name`.
    ///
    /// # Errors
    ///
    /// Returns `CommandNameError` if the name is invalid.
    pub fn new(name: impl Into<String>) -> Result<Self, CommandNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(CommandName(name))
    }

    /// Check `name` without allocating.
    pub fn validate(name: &str) -> Result<(), CommandNameError> {
        let first = name.chars().next().ok_or(CommandNameError::Empty)?;
        if name.len() > MAX_COMMAND_NAME_LENGTH {
            return Err(CommandNameError::TooLong {
                length: name.len(),
                max: MAX_COMMAND_NAME_LENGTH,
            });
        }
        if first == '-' {
            return Err(CommandNameError::InvalidStart { char: first });
        }
        match name
            .chars()
            .enumerate()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            Some((position, char)) => Err(CommandNameError::InvalidChar { char, position }),
            None => Ok(()),
        }
    }

    /// The name as written in scripts
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CommandName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_kakoune_style_names() {
        for name in ["save", "lsp-hover", "my_plugin_run2", "_private", "9lives"] {
            assert!(CommandName::new(name).is_ok(), "{} should be valid", name);
        }
        let max = "a".repeat(MAX_COMMAND_NAME_LENGTH);
        assert!(CommandName::new(max).is_ok());
    }

    #[test]
    fn test_rejects_empty_and_overlong() {
        assert_eq!(CommandName::new("").unwrap_err(), CommandNameError::Empty);
        let long = "a".repeat(MAX_COMMAND_NAME_LENGTH + 1);
        assert!(matches!(
            CommandName::new(long).unwrap_err(),
            CommandNameError::TooLong { length: 257, max: 256 }
        ));
    }

    #[test]
    fn test_leading_dash_would_be_a_switch() {
        let err = CommandName::new("-override").unwrap_err();
        assert_eq!(err, CommandNameError::InvalidStart { char: '-' });
        assert!(err.to_string().contains("'-'"));
    }

    #[test]
    fn test_rejects_characters_kakoune_would_split_or_expand() {
        for (name, bad, offset) in [
            ("has space", ' ', 3),
            ("quoted\"name", '"', 6),
            ("pct%sh", '%', 3),
            ("brace}", '}', 5),
            ("semi;colon", ';', 4),
            ("a.b", '.', 1),
        ] {
            assert_eq!(
                CommandName::new(name).unwrap_err(),
                CommandNameError::InvalidChar {
                    char: bad,
                    position: offset
                },
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn test_display_and_str_comparison() {
        let name = CommandName::new("save").unwrap();
        assert_eq!(name.to_string(), "save");
        assert!(name == *"save");
        assert_eq!(name.as_str(), "save");
    }
}
