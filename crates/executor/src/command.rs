//! Command definitions.
//!
//! A [`CommandDef`] is created with all of its blocks at once and exposes no
//! way to add, remove or reorder them afterwards. The block index written
//! into the generated script therefore always selects the same body on a
//! later execution pass of the same binary.

use kakbridge_core::CommandName;

use crate::block::Block;
use crate::{Error, Result};

/// Switches passed to Kakoune's `define-command`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefineOptions {
    /// Exact number of parameters the command takes (`-params N`)
    pub params: usize,
    /// Help text shown by Kakoune's completion (`-docstring`)
    pub docstring: Option<String>,
    /// Replace an existing command of the same name (`-override`)
    pub override_existing: bool,
}

impl DefineOptions {
    /// Options for a command without parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameter count
    pub fn params(mut self, params: usize) -> Self {
        self.params = params;
        self
    }

    /// Set the docstring
    pub fn docstring(mut self, doc: impl Into<String>) -> Self {
        self.docstring = Some(doc.into());
        self
    }

    /// Allow redefining an existing command
    pub fn override_existing(mut self, yes: bool) -> Self {
        self.override_existing = yes;
        self
    }
}

/// A named command and its ordered blocks.
#[derive(Debug)]
pub struct CommandDef {
    name: CommandName,
    options: DefineOptions,
    blocks: Vec<Block>,
}

impl CommandDef {
    /// Build a command definition.
    ///
    /// # Errors
    ///
    /// - `Error::Core` if `name` is not a valid command name
    /// - `Error::InvalidDefinition` if `blocks` is empty
    pub fn new(name: &str, options: DefineOptions, blocks: Vec<Block>) -> Result<Self> {
        let name = CommandName::new(name)?;
        if blocks.is_empty() {
            return Err(Error::InvalidDefinition {
                reason: format!("command '{}' has no blocks", name),
            });
        }
        Ok(CommandDef {
            name,
            options,
            blocks,
        })
    }

    /// Command name
    pub fn name(&self) -> &CommandName {
        &self.name
    }

    /// `define-command` switches
    pub fn options(&self) -> &DefineOptions {
        &self.options
    }

    /// Blocks in index order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block at `index`, if registered
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }
}
