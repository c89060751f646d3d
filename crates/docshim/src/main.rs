//! docshim CLI - renders legacy documentation tag trees.
//!
//! Provides commands for:
//! - `render`: Render JSON document trees to HTML or JSON
//! - `icons`: List the icon table
//! - `components`: List the effective component map

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ComponentsArgs, RenderArgs};
use output::Output;

/// docshim - Legacy documentation tag compatibility layer.
#[derive(Parser)]
#[command(name = "docshim", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render document trees.
    Render(RenderArgs),
    /// List known icon names.
    Icons,
    /// List the effective component map.
    Components(ComponentsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Icons => commands::icons::execute(),
        Commands::Components(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
