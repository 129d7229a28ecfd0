//! docview CLI - headless documentation viewer.
//!
//! Provides commands for:
//! - `open`: Boot the viewer on a location and print the page
//! - `search`: Query the bundle's search index
//! - `serve`: Start the preview server

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{OpenArgs, SearchArgs, ServeArgs};
use output::Output;

/// docview - documentation viewer.
#[derive(Parser)]
#[command(name = "docview", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a location in the headless viewer.
    Open(OpenArgs),
    /// Search the bundle.
    Search(SearchArgs),
    /// Start the preview server.
    Serve(ServeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Open(args) => args.execute(&output),
        Commands::Search(args) => args.execute(&output),
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(&output)),
            Err(e) => Err(e.into()),
        },
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
