//! The Plugin - Command Block Registry and Dispatch Router.
//!
//! A plugin binary registers every command on every run, then hands the
//! parsed [`Request`] to [`Plugin::dispatch`]:
//!
//! - **Definition pass** (no command name, or one this binary does not
//!   register): the `define-command` script of every command is written to
//!   the output, in registration order. No block body runs.
//! - **Execution pass**: the block index is bounds-checked against the
//!   command's blocks and exactly one body runs. A body failure is reported
//!   to Kakoune with a `fail` line and is not a process error.

use std::io::Write;
use std::process::ExitCode;

use kakbridge_core::{Env, ProcessEnv};

use crate::block::Block;
use crate::command::{CommandDef, DefineOptions};
use crate::config::BridgeConfig;
use crate::kak::Kak;
use crate::request::{Invocation, Request};
use crate::{script, Error, Result};

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Definition scripts were written
    Defined {
        /// Names of the defined commands, in output order
        commands: Vec<String>,
    },
    /// The selected block ran to completion
    Executed {
        /// Command name
        command: String,
        /// Block index
        block: usize,
    },
    /// The selected block failed and a `fail` line was written
    Failed {
        /// Command name
        command: String,
        /// Block index
        block: usize,
        /// The message shown to the user
        message: String,
    },
}

/// A set of Kakoune commands served by one binary.
///
/// # Example
///
/// ```ignore
/// use kakbridge_executor::{Block, BridgeConfig, DefineOptions, Plugin};
///
/// let mut plugin = Plugin::new(BridgeConfig::default())?;
/// plugin.define_command(
///     "hello",
///     DefineOptions::new(),
///     vec![Block::new(|kak| {
///         kak.echo("hello from rust")?;
///         Ok(())
///     })],
/// )?;
/// ```
#[derive(Debug)]
pub struct Plugin {
    config: BridgeConfig,
    binary: String,
    commands: Vec<CommandDef>,
}

impl Plugin {
    /// Create a plugin with no commands.
    ///
    /// The binary written into scripts is `config.binary`, or the running
    /// executable when unset.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if the running executable cannot be located
    /// - `Error::Config` if the binary path cannot be embedded in a
    ///   Kakoune `%{...}` block
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let binary = match &config.binary {
            Some(bin) => bin.clone(),
            None => std::env::current_exe()?.to_string_lossy().into_owned(),
        };
        Self::with_binary(config, binary)
    }

    /// Create a plugin that writes `binary` into its scripts.
    pub fn with_binary(config: BridgeConfig, binary: impl Into<String>) -> Result<Self> {
        let binary = binary.into();
        if binary.is_empty() {
            return Err(Error::Config {
                reason: "binary path is empty".to_string(),
            });
        }
        // Kakoune matches braces to find the end of a %{...} block
        if binary.contains('{') || binary.contains('}') {
            return Err(Error::Config {
                reason: format!("binary path '{}' contains braces", binary),
            });
        }
        Ok(Plugin {
            config,
            binary,
            commands: Vec::new(),
        })
    }

    /// Binary path written into generated scripts
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Registered commands, in registration order
    pub fn commands(&self) -> &[CommandDef] {
        &self.commands
    }

    /// Register a command with all of its blocks.
    ///
    /// # Errors
    ///
    /// `Error::InvalidDefinition` or `Error::Core` for an invalid name, an
    /// empty block list or a name that is already registered.
    pub fn define_command(
        &mut self,
        name: &str,
        options: DefineOptions,
        blocks: Vec<Block>,
    ) -> Result<&mut Self> {
        self.define(CommandDef::new(name, options, blocks)?)
    }

    /// Register a prepared command definition.
    pub fn define(&mut self, command: CommandDef) -> Result<&mut Self> {
        if self.find(command.name().as_str()).is_some() {
            return Err(Error::InvalidDefinition {
                reason: format!("command '{}' is defined twice", command.name()),
            });
        }
        tracing::debug!(
            target: "kakbridge::plugin",
            command = %command.name(),
            params = command.options().params,
            blocks = command.blocks().len(),
            "registered command"
        );
        self.commands.push(command);
        Ok(self)
    }

    fn find(&self, name: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.name().as_str() == name)
    }

    /// Definition script for every registered command.
    pub fn definition_script(&self) -> String {
        self.commands
            .iter()
            .map(|c| script::render(&self.binary, c))
            .collect()
    }

    /// Handle one request.
    ///
    /// # Errors
    ///
    /// - `Error::Protocol` if a registered command comes with a missing or
    ///   malformed block index
    /// - `Error::BlockUnavailable` if the block index is out of range; no
    ///   body runs
    /// - `Error::Io` if writing to `out` fails
    ///
    /// Block body failures are not errors; see [`Outcome::Failed`].
    pub fn dispatch(
        &self,
        request: &Request,
        env: &dyn Env,
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        let outcome = match request {
            Request::Execute(call) => match self.find(&call.command) {
                Some(command) => {
                    let invocation = call.invocation()?;
                    self.execute(command, &invocation, env, out)?
                }
                None => {
                    tracing::warn!(
                        target: "kakbridge::plugin",
                        command = %call.command,
                        "unknown command, emitting definitions instead"
                    );
                    self.define_all(out)?
                }
            },
            Request::Define => self.define_all(out)?,
        };
        out.flush()?;
        Ok(outcome)
    }

    fn define_all(&self, out: &mut dyn Write) -> Result<Outcome> {
        out.write_all(self.definition_script().as_bytes())?;
        let commands: Vec<String> = self
            .commands
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        tracing::info!(target: "kakbridge::plugin", count = commands.len(), "wrote definitions");
        Ok(Outcome::Defined { commands })
    }

    fn execute(
        &self,
        command: &CommandDef,
        invocation: &Invocation,
        env: &dyn Env,
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        let block = command
            .block(invocation.block)
            .ok_or_else(|| Error::BlockUnavailable {
                command: invocation.command.clone(),
                index: invocation.block,
                available: command.blocks().len(),
            })?;

        tracing::debug!(
            target: "kakbridge::plugin",
            command = %invocation.command,
            block = invocation.block,
            params = invocation.params.len(),
            "running block"
        );

        let result = {
            let mut kak = Kak::new(invocation, block.exported(), env, &mut *out);
            block.run(&mut kak)
        };

        match result {
            Ok(()) => Ok(Outcome::Executed {
                command: invocation.command.clone(),
                block: invocation.block,
            }),
            Err(e) => {
                let message = format!(
                    "{}: {}: {:#}",
                    self.config.fail_prefix, invocation.command, e
                );
                tracing::warn!(
                    target: "kakbridge::plugin",
                    command = %invocation.command,
                    block = invocation.block,
                    error = %format!("{:#}", e),
                    "block failed"
                );
                let mut kak = Kak::new(invocation, &[], env, &mut *out);
                kak.fail(&message)?;
                Ok(Outcome::Failed {
                    command: invocation.command.clone(),
                    block: invocation.block,
                    message,
                })
            }
        }
    }

    /// Serve the current process: parse argv, dispatch against the process
    /// environment and write to stdout.
    pub fn serve(&self) -> Result<Outcome> {
        let request = Request::from_env_args();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.dispatch(&request, &ProcessEnv, &mut out)
    }
}

/// Process entry point for a plugin binary.
///
/// Loads configuration, installs logging, lets `setup` register commands and
/// serves the current invocation. Protocol and setup errors are printed to
/// stderr and yield a failing exit status; block failures do not.
///
/// ```ignore
/// fn main() -> std::process::ExitCode {
///     kakbridge_executor::run_main(|plugin| {
///         plugin.define_command("hello", DefineOptions::new(), vec![/* ... */])?;
///         Ok(())
///     })
/// }
/// ```
pub fn run_main<F>(setup: F) -> ExitCode
where
    F: FnOnce(&mut Plugin) -> Result<()>,
{
    match try_main(setup) {
        Ok(outcome) => {
            tracing::debug!(target: "kakbridge::plugin", ?outcome, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(target: "kakbridge::plugin", error = %e, "invocation failed");
            eprintln!("kakbridge: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main<F>(setup: F) -> Result<Outcome>
where
    F: FnOnce(&mut Plugin) -> Result<()>,
{
    let config = BridgeConfig::from_env(&ProcessEnv)?;
    crate::logging::init_logging(&config)?;
    let mut plugin = Plugin::new(config)?;
    setup(&mut plugin)?;
    plugin.serve()
}
