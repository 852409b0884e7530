//! `mandala completions`: shell completion scripts.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `mandala completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate a completion script for `command` to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(shell, command, &mut out)
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) -> Result<()> {
    let bin_name = command.get_name().to_string();
    generate(shell, command, bin_name, out);
    out.flush()?;
    Ok(())
}
