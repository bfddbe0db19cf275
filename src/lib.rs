//! kakbridge - define Kakoune commands whose bodies run as Rust code
//!
//! A plugin binary registers its commands on every run. Run without
//! arguments it prints the `define-command` script Kakoune should evaluate;
//! run by that script it executes exactly one command body.
//!
//! # Quick Start
//!
//! ```ignore
//! use kakbridge::{names, run_main, Block, DefineOptions};
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
//!
//! and in kakrc:
//!
//! ```text
//! evaluate-commands %sh{ my-plugin }
//! ```

// Re-export the public API from kakbridge-executor
pub use kakbridge_executor::*;

// Block bodies return anyhow::Result
pub use anyhow;
