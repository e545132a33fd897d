// src/cli/completion.rs
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};
use tracing::{debug, instrument};

fn parse_shell(shell: &str) -> CliResult<Shell> {
    match shell.trim().to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        other => Err(CliError::InvalidInput(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish",
            other
        ))),
    }
}

/// Writes the completion script for `shell` into `out`.
pub fn write_completion(shell: &str, out: &mut dyn Write) -> CliResult<()> {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    debug!("Generating {} completion for {}", shell, bin_name);
    generate(shell, &mut cmd, bin_name, out);
    Ok(())
}

/// Prints the completion script to stdout.
///
/// ```bash
/// bmtree completion bash > ~/.local/share/bash-completion/completions/bmtree
/// eval "$(bmtree completion zsh)"
/// ```
#[instrument(level = "debug")]
pub fn generate_completion(shell: &str) -> CliResult<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_completion(shell, &mut handle)
}
