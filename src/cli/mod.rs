// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;

pub mod args;
pub mod bookmark_commands;
pub mod browse;
pub mod completion;
pub mod display;
pub mod error;

pub fn execute_command_with_services(
    cli: Cli,
    services: ServiceContainer,
    settings: &Settings,
) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }
    match cli.command {
        Some(Commands::Ls { .. }) => bookmark_commands::ls(cli, &services, settings),
        Some(Commands::Show { .. }) => bookmark_commands::show(cli, &services, settings),
        Some(Commands::Path { .. }) => bookmark_commands::path(cli, &services, settings),
        Some(Commands::Search { .. }) => bookmark_commands::search(cli, &services),
        Some(Commands::Suggest { .. }) => bookmark_commands::suggest(cli, &services),
        Some(Commands::Stats { .. }) => bookmark_commands::stats(cli, &services),
        Some(Commands::Tree { .. }) => bookmark_commands::tree(cli, &services, settings),
        Some(Commands::Open { .. }) => bookmark_commands::open(cli, &services),
        Some(Commands::Info) => bookmark_commands::info(cli, &services, settings),
        Some(Commands::Browse) => browse::browse(&services, settings),
        Some(Commands::Completion { shell }) => handle_completion(&shell),
        None => Ok(()),
    }
}

fn handle_completion(shell: &str) -> CliResult<()> {
    match shell.trim().to_lowercase().as_str() {
        "bash" => {
            eprintln!("# bash completion for bmtree, install with one of:");
            eprintln!("# - eval \"$(bmtree completion bash)\"");
            eprintln!("# - bmtree completion bash > ~/.local/share/bash-completion/completions/bmtree");
        }
        "zsh" => {
            eprintln!("# zsh completion for bmtree, install with one of:");
            eprintln!("# - eval \"$(bmtree completion zsh)\"");
            eprintln!("# - bmtree completion zsh > ~/.zfunc/_bmtree  (with ~/.zfunc in fpath)");
        }
        "fish" => {
            eprintln!("# fish completion for bmtree, install with one of:");
            eprintln!("# - bmtree completion fish | source");
            eprintln!("# - bmtree completion fish > ~/.config/fish/completions/bmtree.fish");
        }
        _ => {}
    }

    completion::generate_completion(shell)
        .map_err(|e| e.context("Failed to generate completion script"))
}
