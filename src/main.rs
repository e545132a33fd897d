// src/main.rs
use bmtree::cli::args::Cli;
use bmtree::cli::display;
use bmtree::cli::error::CliError;
use bmtree::config::load_settings;
use bmtree::exitcode;
use bmtree::infrastructure::di::ServiceContainer;
use clap::Parser;
use crossterm::style::Stylize;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug, cli.no_color);
    display::init_color(cli.no_color);

    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format!("Invalid configuration: {}", e).red());
            std::process::exit(exitcode::USAGE);
        }
    };
    if let Some(source) = cli.source.as_ref() {
        debug!("Source overridden on command line: {}", source);
        settings.source = Some(source.clone());
    }

    // Single composition root
    let services = match ServiceContainer::new(&settings) {
        Ok(container) => container,
        Err(e) => {
            eprintln!("{}: {}", "Failed to create service container".red(), e);
            std::process::exit(exitcode::USAGE);
        }
    };

    match bmtree::cli::execute_command_with_services(cli, services, &settings) {
        Ok(()) => std::process::exit(exitcode::SUCCESS),
        Err(CliError::OperationAborted) => {
            eprintln!("{}", "Cancelled".yellow());
            std::process::exit(exitcode::CANCEL);
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(exitcode::USAGE);
        }
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let noisy_modules = ["reqwest", "mio", "want", "hyper_util", "rustls", "rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // stdout stays reserved for command output
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
