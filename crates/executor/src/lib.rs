//! # kakbridge Executor
//!
//! Define Kakoune commands whose bodies are Rust closures.
//!
//! Kakoune cannot call into a running program, so every command is served by
//! re-executing the plugin binary:
//!
//! 1. The user's kakrc runs `evaluate-commands %sh{ my-plugin }`. With no
//!    arguments the binary writes one `define-command` per registered
//!    command to stdout, and Kakoune evaluates it.
//! 2. Each generated command contains one `%sh{}` sub-block per [`Block`],
//!    each running `my-plugin <command> <block index> "${1}" ...`.
//! 3. That run selects the block by index, exposes the exported `kak_*`
//!    values through [`Kak`], and every line it prints is evaluated by
//!    Kakoune as a command.
//!
//! ## Quick Start
//!
//! ```text
//! use kakbridge_executor::{names, run_main, Block, DefineOptions};
//!
//! fn main() -> std::process::ExitCode {
//!     run_main(|plugin| {
//!         plugin.define_command(
//!             "where-am-i",
//!             DefineOptions::new(),
//!             vec![Block::new(|kak| {
//!                 let name = kak.require(&names::BUFNAME)?;
//!                 kak.echo(&format!("editing {}", name))?;
//!                 Ok(())
//!             })
//!             .export(names::BUFNAME)],
//!         )?;
//!         Ok(())
//!     })
//! }
//! ```

#![warn(missing_docs)]

mod block;
mod command;
mod config;
mod error;
mod kak;
mod logging;
mod plugin;
mod request;
pub mod script;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use block::{Block, BlockBody};
pub use command::{CommandDef, DefineOptions};
pub use config::{BridgeConfig, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
pub use error::Error;
pub use kak::{Kak, Scope};
pub use logging::init_logging;
pub use plugin::{run_main, Outcome, Plugin};
pub use request::{Call, Invocation, Request};

// Re-export core types so users don't need kakbridge-core directly
pub use kakbridge_core::vars::names;
pub use kakbridge_core::{quote, tokenize, CommandName, Env, MapEnv, ProcessEnv, Var, VarKind};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
