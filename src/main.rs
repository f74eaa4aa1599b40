use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use luna_cycle::cli::Cli;
use luna_cycle::{commands, input};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // stdout carries the JSON result, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let history = match &cli.input {
        Some(path) => input::load_history(path)
            .with_context(|| format!("failed to read history from {}", path.display()))?,
        None => input::read_history(io::stdin().lock()).context("failed to read history from stdin")?,
    };

    let output = commands::execute(&cli.command, &history)?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
