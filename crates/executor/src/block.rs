//! Command bodies.
//!
//! A [`Block`] is the Rust side of one `%sh{}` sub-block in a generated
//! command. Its position in the owning command is its only identity across
//! the process boundary.

use std::fmt;

use kakbridge_core::Var;

use crate::kak::Kak;

/// Signature of a block body.
///
/// The body receives the invocation context for the duration of the call.
/// Returning `Err` reports the failure to the user through Kakoune's `fail`.
pub type BlockBody = Box<dyn Fn(&mut Kak<'_>) -> anyhow::Result<()>>;

/// One registered command body and the values Kakoune must export to it.
pub struct Block {
    exports: Vec<Var>,
    body: BlockBody,
}

impl Block {
    /// Create a block with no exported values.
    ///
    /// ```ignore
    /// use kakbridge_executor::{Block, names};
    ///
    /// let block = Block::new(|kak| {
    ///     let name = kak.get(&names::BUFNAME).unwrap_or_default();
    ///     kak.echo(&format!("editing {}", name))?;
    ///     Ok(())
    /// })
    /// .export(names::BUFNAME);
    /// ```
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut Kak<'_>) -> anyhow::Result<()> + 'static,
    {
        Block {
            exports: Vec::new(),
            body: Box::new(body),
        }
    }

    /// Ask Kakoune to export `var` to this block.
    ///
    /// Exports keep insertion order; repeated variables are ignored.
    pub fn export(mut self, var: Var) -> Self {
        if !self.exports.contains(&var) {
            self.exports.push(var);
        }
        self
    }

    /// Export several variables, in order.
    pub fn exports<I>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = Var>,
    {
        vars.into_iter().fold(self, Block::export)
    }

    /// Variables exported to this block, in declaration order
    pub fn exported(&self) -> &[Var] {
        &self.exports
    }

    pub(crate) fn run(&self, kak: &mut Kak<'_>) -> anyhow::Result<()> {
        (self.body)(kak)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("exports", &self.exports)
            .finish_non_exhaustive()
    }
}
