//! Script Generator.
//!
//! Renders the `define-command` text Kakoune evaluates on the definition
//! pass. For a command `save` with two parameters and two blocks:
//!
//! ```text
//! define-command -params 2 save %{
//!   evaluate-commands %sh{
//!     # kakbridge exports: $kak_buffile
//!     '/usr/bin/plugin' 'save' 0 "${1}" "${2}"
//!   }
//!   evaluate-commands %sh{
//!     # kakbridge exports:
//!     '/usr/bin/plugin' 'save' 1 "${1}" "${2}"
//!   }
//! }
//! ```
//!
//! The comment line is never executed, but Kakoune decides which `kak_*`
//! variables to export by scanning the block text, so it must always be
//! present.

use std::fmt::Write as _;

use kakbridge_core::quote;

use crate::block::Block;
use crate::command::CommandDef;

/// Leading text of the export comment in every sub-block
pub const EXPORT_COMMENT: &str = "# kakbridge exports:";

/// Quote `value` as a single POSIX shell word.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Positional parameter references for `params` parameters, each prefixed
/// with a single space: ` "${1}" "${2}"`.
pub fn positional_refs(params: usize) -> String {
    (1..=params).map(|i| format!(" \"${{{}}}\"", i)).collect()
}

/// Render the full definition script of one command.
///
/// Pure: the same binary path and command always produce the same bytes.
pub fn render(bin: &str, command: &CommandDef) -> String {
    let options = command.options();
    let mut header = String::from("define-command");
    if options.override_existing {
        header.push_str(" -override");
    }
    if let Some(doc) = &options.docstring {
        let _ = write!(header, " -docstring {}", quote(doc));
    }
    let _ = write!(header, " -params {} {}", options.params, command.name());

    let blocks = command
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| {
            render_block(bin, command.name().as_str(), index, options.params, block)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{} %{{\n{}\n}}\n", header, blocks)
}

fn render_block(bin: &str, name: &str, index: usize, params: usize, block: &Block) -> String {
    let mut comment = String::from(EXPORT_COMMENT);
    for var in block.exported() {
        comment.push(' ');
        comment.push_str(&var.reference());
    }

    format!(
        "  evaluate-commands %sh{{\n    {}\n    {} {} {}{}\n  }}",
        comment,
        shell_quote(bin),
        shell_quote(name),
        index,
        positional_refs(params)
    )
}
