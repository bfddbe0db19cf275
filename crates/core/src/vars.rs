//! Variable Bridge between logical names and Kakoune environment keys.
//!
//! Kakoune exports a value to a `%sh{}` block only when the block's text
//! mentions `$kak_<name>`. Inside the re-invoked process the value is then
//! read back from the environment key `kak_<name>`. Option values use the
//! `kak_opt_` prefix and register contents the `kak_reg_` prefix.
//!
//! Callers always work with bare names (`buffile`, not `kak_buffile`); a
//! [`Var`] owns the prefixing in both directions.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

/// Prefix of plain value keys
pub const PLAIN_PREFIX: &str = "kak_";
/// Prefix of option value keys
pub const OPTION_PREFIX: &str = "kak_opt_";
/// Prefix of register value keys
pub const REGISTER_PREFIX: &str = "kak_reg_";

/// Namespace of an exported value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarKind {
    /// `%val{name}`, exported as `kak_<name>`
    Plain,
    /// `%opt{name}`, exported as `kak_opt_<name>`
    Option,
    /// `%reg{name}`, exported as `kak_reg_<name>`
    Register,
}

impl VarKind {
    /// Environment key prefix for this kind
    pub fn prefix(self) -> &'static str {
        match self {
            VarKind::Plain => PLAIN_PREFIX,
            VarKind::Option => OPTION_PREFIX,
            VarKind::Register => REGISTER_PREFIX,
        }
    }
}

/// A logical variable name bound to its Kakoune namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var {
    kind: VarKind,
    name: Cow<'static, str>,
}

impl Var {
    /// Plain value such as `buffile` or `client`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVarName`] if `name` is empty, contains
    /// anything but ASCII alphanumerics and underscores, or already starts
    /// with a `kak_`/`opt_`/`reg_` prefix.
    pub fn plain(name: impl Into<String>) -> Result<Self> {
        Self::new(VarKind::Plain, name)
    }

    /// Option value
    pub fn option(name: impl Into<String>) -> Result<Self> {
        Self::new(VarKind::Option, name)
    }

    /// Register contents
    pub fn register(name: impl Into<String>) -> Result<Self> {
        Self::new(VarKind::Register, name)
    }

    /// Validate and build a binding of the given kind
    pub fn new(kind: VarKind, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate(kind, &name)?;
        Ok(Var {
            kind,
            name: Cow::Owned(name),
        })
    }

    /// Build a binding from a trusted static name without validation.
    ///
    /// Used for the well-known names in [`names`].
    pub const fn from_static(kind: VarKind, name: &'static str) -> Self {
        Var {
            kind,
            name: Cow::Borrowed(name),
        }
    }

    fn validate(kind: VarKind, name: &str) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidVarName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '_')
        {
            return Err(invalid(&format!(
                "invalid character '{}' (only alphanumeric and underscore allowed)",
                c
            )));
        }
        if name.starts_with(PLAIN_PREFIX) {
            return Err(invalid("pass the bare name, without the kak_ prefix"));
        }
        // Plain names shadowing another namespace would map to the same key
        if kind == VarKind::Plain && (name.starts_with("opt_") || name.starts_with("reg_")) {
            return Err(invalid(
                "opt_ and reg_ are reserved; use an option or register binding",
            ));
        }
        Ok(())
    }

    /// The namespace of this binding
    pub fn kind(&self) -> VarKind {
        self.kind
    }

    /// The bare name, without any prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Environment key holding the value, e.g. `kak_opt_filetype`
    pub fn env_key(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.name)
    }

    /// Shell reference that makes Kakoune export the value, e.g. `$kak_buffile`
    pub fn reference(&self) -> String {
        format!("${}", self.env_key())
    }

    /// Import direction: recover the binding from an environment key.
    ///
    /// Returns `None` for keys that are not `kak_*` keys or whose suffix is
    /// not a valid name.
    pub fn from_env_key(key: &str) -> Option<Var> {
        // Longest prefixes first: kak_opt_ and kak_reg_ both start with kak_
        if let Some(name) = key.strip_prefix(OPTION_PREFIX) {
            return Var::option(name).ok();
        }
        if let Some(name) = key.strip_prefix(REGISTER_PREFIX) {
            return Var::register(name).ok();
        }
        key.strip_prefix(PLAIN_PREFIX)
            .and_then(|name| Var::plain(name).ok())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.env_key())
    }
}

/// Well-known values Kakoune can export.
pub mod names {
    use super::{Var, VarKind};

    /// Full path of the current buffer's file
    pub const BUFFILE: Var = Var::from_static(VarKind::Plain, "buffile");
    /// Name of the current buffer
    pub const BUFNAME: Var = Var::from_static(VarKind::Plain, "bufname");
    /// Name of the client that triggered the command
    pub const CLIENT: Var = Var::from_static(VarKind::Plain, "client");
    /// Name of the Kakoune session
    pub const SESSION: Var = Var::from_static(VarKind::Plain, "session");
    /// Content of the main selection
    pub const SELECTION: Var = Var::from_static(VarKind::Plain, "selection");
    /// Description of all selections
    pub const SELECTIONS_DESC: Var = Var::from_static(VarKind::Plain, "selections_desc");
    /// Line of the main cursor, 1-based
    pub const CURSOR_LINE: Var = Var::from_static(VarKind::Plain, "cursor_line");
    /// Column of the main cursor in bytes, 1-based
    pub const CURSOR_COLUMN: Var = Var::from_static(VarKind::Plain, "cursor_column");
    /// Timestamp of the current buffer
    pub const TIMESTAMP: Var = Var::from_static(VarKind::Plain, "timestamp");
    /// Filetype option of the current buffer
    pub const FILETYPE: Var = Var::from_static(VarKind::Option, "filetype");
}
