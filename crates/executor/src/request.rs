//! Invocation requests parsed from argv.
//!
//! The generated script re-invokes the host binary as
//!
//! ```text
//! <binary> <commandName> <blockIndex> [positional args...]
//! ```
//!
//! Without a command name the run is a definition pass. The block index is
//! only validated once the command name is known to be registered.

use crate::{Error, Result};

/// What this process was started to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Emit the definition script for every registered command
    Define,
    /// Run one block of the named command, if this binary registers it
    Execute(Call),
}

/// Raw arguments of an execution pass.
///
/// The block index stays unparsed until the command name is known to be
/// registered; an unknown name falls back to the definition pass whatever
/// follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Command name as written in the generated script
    pub command: String,
    /// Block index as passed on argv
    pub index: Option<String>,
    /// Positional parameters Kakoune passed to the command
    pub params: Vec<String>,
}

/// A resolved execution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Command name as written in the generated script
    pub command: String,
    /// Index of the block to run
    pub block: usize,
    /// Positional parameters Kakoune passed to the command
    pub params: Vec<String>,
}

impl Request {
    /// Parse the arguments following argv\[0\].
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        let command = match args.next() {
            Some(command) if !command.is_empty() => command,
            _ => return Request::Define,
        };

        Request::Execute(Call {
            command,
            index: args.next(),
            params: args.collect(),
        })
    }

    /// Parse this process's own arguments.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn from_env_args() -> Self {
        Self::from_args(
            std::env::args_os()
                .skip(1)
                .map(|a| a.to_string_lossy().into_owned()),
        )
    }

    /// Command name of an execution pass
    pub fn command(&self) -> Option<&str> {
        match self {
            Request::Define => None,
            Request::Execute(call) => Some(&call.command),
        }
    }
}

impl Call {
    /// Parse the block index.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` when the block index is missing or not a
    /// non-negative integer.
    pub fn invocation(&self) -> Result<Invocation> {
        let raw_index = self.index.as_deref().ok_or_else(|| Error::Protocol {
            reason: format!("command '{}' invoked without a block index", self.command),
        })?;
        let block = raw_index.parse::<usize>().map_err(|_| Error::Protocol {
            reason: format!(
                "command '{}' invoked with invalid block index '{}'",
                self.command, raw_index
            ),
        })?;

        Ok(Invocation {
            command: self.command.clone(),
            block,
            params: self.params.clone(),
        })
    }
}
