//! Core types for kakbridge
//!
//! This crate defines the pieces of the Kakoune protocol that do not depend
//! on how commands are registered or dispatched:
//! - quote: Argument Encoder for Kakoune double-quoted words
//! - vars: Variable Bridge between logical names and `kak_*` environment keys
//! - name: validated Kakoune command names
//! - env: read-only access to the environment Kakoune exports
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod env;
pub mod error;
pub mod name;
pub mod quote;
pub mod vars;

pub use env::{Env, MapEnv, ProcessEnv};
pub use error::{Error, Result};
pub use name::{CommandName, CommandNameError, MAX_COMMAND_NAME_LENGTH};
pub use quote::{escape_char, quote, tokenize};
pub use vars::{Var, VarKind, OPTION_PREFIX, PLAIN_PREFIX, REGISTER_PREFIX};
