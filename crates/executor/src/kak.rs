//! Invocation context handed to a running block.
//!
//! A [`Kak`] exists only for the duration of one block body. It borrows the
//! parsed invocation, the exported environment and the output channel; the
//! borrow makes it impossible for a body to keep the context past its own
//! return.
//!
//! Every line written to the output is evaluated by Kakoune as one command.

use std::fmt;
use std::io::Write;

use kakbridge_core::{quote, Env, Var};

use crate::request::Invocation;
use crate::Result;

/// Scope argument of `set-option` and `unset-option`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `global`
    Global,
    /// `buffer`
    Buffer,
    /// `window`
    Window,
    /// `current`, the innermost scope where the option is set
    Current,
}

impl Scope {
    /// Keyword Kakoune expects
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Buffer => "buffer",
            Scope::Window => "window",
            Scope::Current => "current",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context of one execution pass.
pub struct Kak<'a> {
    invocation: &'a Invocation,
    exports: &'a [Var],
    env: &'a dyn Env,
    out: &'a mut dyn Write,
}

impl<'a> Kak<'a> {
    pub(crate) fn new(
        invocation: &'a Invocation,
        exports: &'a [Var],
        env: &'a dyn Env,
        out: &'a mut dyn Write,
    ) -> Self {
        Kak {
            invocation,
            exports,
            env,
            out,
        }
    }

    // ==================== Invocation ====================

    /// Name of the running command
    pub fn command_name(&self) -> &str {
        &self.invocation.command
    }

    /// Index of the running block
    pub fn block_index(&self) -> usize {
        self.invocation.block
    }

    /// All positional parameters
    pub fn params(&self) -> &[String] {
        &self.invocation.params
    }

    /// Positional parameter `n`, 1-based like the `${n}` it came from
    pub fn param(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.invocation.params.get(i))
            .map(String::as_str)
    }

    // ==================== Variables ====================

    /// Read an exported value.
    ///
    /// Returns `None` when Kakoune did not set the key. Reading a variable
    /// the block never declared usually means the export list is incomplete,
    /// so it is logged.
    pub fn get(&self, var: &Var) -> Option<String> {
        if !self.exports.contains(var) {
            tracing::warn!(
                target: "kakbridge::kak",
                command = %self.invocation.command,
                block = self.invocation.block,
                var = %var.env_key(),
                "reading a variable the block does not export"
            );
        }
        self.env.var(var)
    }

    /// Read the plain value `name` (`kak_<name>`).
    ///
    /// # Errors
    ///
    /// Returns the validation error for a malformed name, such as one that
    /// repeats the `kak_` prefix. `Ok(None)` means the value is not set.
    pub fn var(&self, name: &str) -> Result<Option<String>> {
        Ok(self.get(&Var::plain(name)?))
    }

    /// Read the option value `name` (`kak_opt_<name>`)
    pub fn opt(&self, name: &str) -> Result<Option<String>> {
        Ok(self.get(&Var::option(name)?))
    }

    /// Read a value that must be set
    pub fn require(&self, var: &Var) -> anyhow::Result<String> {
        self.get(var)
            .ok_or_else(|| anyhow::anyhow!("{} is not set", var.env_key()))
    }

    // ==================== Output ====================

    /// Write one line verbatim.
    pub fn raw(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    /// Run a Kakoune command with every argument quoted:
    /// `name "arg1" "arg2" ...`
    pub fn command<I, S>(&mut self, name: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = String::from(name);
        for arg in args {
            line.push(' ');
            line.push_str(&quote(arg.as_ref()));
        }
        self.raw(&line)
    }

    /// Show a message in the status line
    pub fn echo(&mut self, message: &str) -> Result<()> {
        self.command("echo", [message])
    }

    /// Show a message with Kakoune markup (`{Error}...`)
    pub fn echo_markup(&mut self, message: &str) -> Result<()> {
        self.raw(&format!("echo -markup {}", quote(message)))
    }

    /// Append a message to the `*debug*` buffer
    pub fn echo_debug(&mut self, message: &str) -> Result<()> {
        self.raw(&format!("echo -debug {}", quote(message)))
    }

    /// Report a failure to the user
    pub fn fail(&mut self, message: &str) -> Result<()> {
        self.command("fail", [message])
    }

    /// Set option `name` in `scope`.
    ///
    /// Options are the only state that survives between invocations.
    pub fn set_option(&mut self, scope: Scope, name: &str, value: &str) -> Result<()> {
        let var = Var::option(name)?;
        self.raw(&format!(
            "set-option {} {} {}",
            scope,
            var.name(),
            quote(value)
        ))
    }

    /// Remove option `name` from `scope`
    pub fn unset_option(&mut self, scope: Scope, name: &str) -> Result<()> {
        let var = Var::option(name)?;
        self.raw(&format!("unset-option {} {}", scope, var.name()))
    }

    /// Evaluate a block of Kakoune commands
    pub fn evaluate(&mut self, commands: &str) -> Result<()> {
        self.command("evaluate-commands", [commands])
    }

    /// Evaluate commands in the context of `client`
    pub fn evaluate_in_client(&mut self, client: &str, commands: &str) -> Result<()> {
        self.raw(&format!(
            "evaluate-commands -client {} {}",
            quote(client),
            quote(commands)
        ))
    }
}

impl fmt::Debug for Kak<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kak")
            .field("invocation", self.invocation)
            .field("exports", &self.exports)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use kakbridge_core::{tokenize, vars::names, MapEnv};

    fn invocation(params: &[&str]) -> Invocation {
        Invocation {
            command: "save".to_string(),
            block: 0,
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn lines(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_params_are_one_based() {
        let inv = invocation(&["first", "second"]);
        let env = MapEnv::new();
        let mut out = Vec::new();
        let kak = Kak::new(&inv, &[], &env, &mut out);

        assert_eq!(kak.param(0), None);
        assert_eq!(kak.param(1), Some("first"));
        assert_eq!(kak.param(2), Some("second"));
        assert_eq!(kak.param(3), None);
        assert_eq!(kak.params().len(), 2);
        assert_eq!(kak.command_name(), "save");
        assert_eq!(kak.block_index(), 0);
    }

    #[test]
    fn test_variable_reads() {
        let inv = invocation(&[]);
        let env = MapEnv::new()
            .with("kak_bufname", "main.rs")
            .with("kak_opt_tabstop", "4")
            .with("kak_selection", "");
        let exports = [names::BUFNAME, Var::option("tabstop").unwrap(), names::SELECTION];
        let mut out = Vec::new();
        let kak = Kak::new(&inv, &exports, &env, &mut out);

        assert_eq!(kak.var("bufname").unwrap().as_deref(), Some("main.rs"));
        assert_eq!(kak.opt("tabstop").unwrap().as_deref(), Some("4"));
        assert_eq!(kak.var("selection").unwrap().as_deref(), Some(""));
        assert_eq!(kak.var("buffile").unwrap(), None);
        assert!(kak.require(&names::BUFFILE).is_err());
    }

    #[test]
    fn test_malformed_variable_names_are_errors() {
        let inv = invocation(&[]);
        let env = MapEnv::new()
            .with("kak_kak_bufname", "main.rs")
            .with("kak_opt_kak_opt_tabstop", "4");
        let mut out = Vec::new();
        let kak = Kak::new(&inv, &[], &env, &mut out);

        for err in [
            kak.var("kak_bufname").unwrap_err(),
            kak.var("opt_tabstop").unwrap_err(),
            kak.var("").unwrap_err(),
            kak.opt("kak_opt_tabstop").unwrap_err(),
            kak.opt("tab stop").unwrap_err(),
        ] {
            assert!(
                matches!(err, Error::Core(kakbridge_core::Error::InvalidVarName { .. })),
                "unexpected error: {:?}",
                err
            );
        }
    }

    #[test]
    fn test_command_quotes_each_argument() {
        let inv = invocation(&[]);
        let env = MapEnv::new();
        let mut out = Vec::new();
        {
            let mut kak = Kak::new(&inv, &[], &env, &mut out);
            kak.command("info", ["-title", "say \"hi\""]).unwrap();
        }
        assert_eq!(lines(&out), vec!["info \"-title\" \"say \"\"hi\"\"\""]);
    }

    #[test]
    fn test_output_primitives() {
        let inv = invocation(&[]);
        let env = MapEnv::new();
        let mut out = Vec::new();
        {
            let mut kak = Kak::new(&inv, &[], &env, &mut out);
            kak.echo("hello").unwrap();
            kak.echo_markup("{Error}oops").unwrap();
            kak.echo_debug("trace").unwrap();
            kak.fail("boom").unwrap();
            kak.set_option(Scope::Global, "kb_count", "3").unwrap();
            kak.unset_option(Scope::Buffer, "kb_count").unwrap();
            kak.evaluate("exec gg").unwrap();
            kak.evaluate_in_client("client0", "echo hi").unwrap();
        }
        assert_eq!(
            lines(&out),
            vec![
                "echo \"hello\"",
                "echo -markup \"{Error}oops\"",
                "echo -debug \"trace\"",
                "fail \"boom\"",
                "set-option global kb_count \"3\"",
                "unset-option buffer kb_count",
                "evaluate-commands \"exec gg\"",
                "evaluate-commands -client \"client0\" \"echo hi\"",
            ]
        );
    }

    #[test]
    fn test_multiline_argument_is_one_command() {
        let inv = invocation(&[]);
        let env = MapEnv::new();
        let mut out = Vec::new();
        {
            let mut kak = Kak::new(&inv, &[], &env, &mut out);
            kak.echo("one\ntwo").unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert_eq!(tokenize(&text).unwrap(), vec!["echo", "one\ntwo"]);
    }

    #[test]
    fn test_set_option_rejects_bad_name() {
        let inv = invocation(&[]);
        let env = MapEnv::new();
        let mut out = Vec::new();
        let mut kak = Kak::new(&inv, &[], &env, &mut out);
        assert!(matches!(
            kak.set_option(Scope::Global, "kak_opt_x", "1"),
            Err(Error::Core(_))
        ));
    }
}
