//! Demo command definitions.
//!
//! Registered in the same order on every run so block indices written by
//! the definition pass stay valid.

use anyhow::Context;
use kakbridge_executor::{names, Block, DefineOptions, Kak, Plugin, Result, Scope, Var};

/// Option holding the `kb-count` counter
pub const COUNT_OPTION: &str = "kb_count";

/// Register every demo command.
pub fn register(plugin: &mut Plugin) -> Result<()> {
    let count = Var::option(COUNT_OPTION)?;

    plugin
        .define_command(
            "kb-hello",
            DefineOptions::new().docstring("echo the current buffer name"),
            vec![Block::new(hello).export(names::BUFNAME)],
        )?
        .define_command(
            "kb-count",
            DefineOptions::new().docstring("count invocations in the kb_count option"),
            vec![Block::new(increment).export(count)],
        )?
        .define_command(
            "kb-greet",
            DefineOptions::new()
                .params(1)
                .docstring("kb-greet <name>: greet someone and log the client"),
            vec![
                Block::new(greet),
                Block::new(log_client).exports([names::CLIENT, names::SESSION]),
            ],
        )?
        .define_command(
            "kb-fail",
            DefineOptions::new().docstring("always fails"),
            vec![Block::new(|_| anyhow::bail!("this command always fails"))],
        )?;
    Ok(())
}

fn hello(kak: &mut Kak<'_>) -> anyhow::Result<()> {
    let name = kak.require(&names::BUFNAME)?;
    kak.echo(&format!("hello from {}", name))?;
    Ok(())
}

fn increment(kak: &mut Kak<'_>) -> anyhow::Result<()> {
    // Kakoune exports int options as plain decimal text
    let current = match kak.opt(COUNT_OPTION)? {
        Some(raw) if !raw.is_empty() => raw
            .parse::<u64>()
            .with_context(|| format!("{} is not a number: {:?}", COUNT_OPTION, raw))?,
        _ => 0,
    };
    let next = current + 1;
    tracing::debug!(target: "kakbridge::demo", current, next, "incrementing counter");
    kak.set_option(Scope::Global, COUNT_OPTION, &next.to_string())?;
    kak.echo(&format!("kb-count: {}", next))?;
    Ok(())
}

fn greet(kak: &mut Kak<'_>) -> anyhow::Result<()> {
    let who = kak.param(1).context("missing name")?.to_string();
    if who.trim().is_empty() {
        anyhow::bail!("name cannot be blank");
    }
    kak.echo_markup(&format!("{{Information}}hello, {}", who))?;
    Ok(())
}

fn log_client(kak: &mut Kak<'_>) -> anyhow::Result<()> {
    let client = kak.get(&names::CLIENT).unwrap_or_else(|| "<none>".to_string());
    let session = kak.get(&names::SESSION).unwrap_or_else(|| "<none>".to_string());
    kak.echo_debug(&format!("kb-greet ran in client {} of session {}", client, session))?;
    Ok(())
}
