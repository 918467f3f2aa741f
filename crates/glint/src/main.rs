//! glint CLI - Markdown preprocessing for terminal rendering.
//!
//! Provides commands for:
//! - `render`: Strip frontmatter and substitute `{{ variables }}`
//! - `strip`: Strip frontmatter only
//! - `vars`: List the variables available to a document

mod commands;
mod document;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, StripArgs, VarsArgs};
use output::Output;

/// glint - Markdown preprocessing for terminal rendering.
#[derive(Parser)]
#[command(name = "glint", version, about)]
struct Cli {
    /// Enable verbose output (debug logs on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip frontmatter and substitute variables.
    Render(RenderArgs),
    /// Strip frontmatter without substituting variables.
    Strip(StripArgs),
    /// Print the resolved variable table of a document.
    Vars(VarsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Strip(args) => args.execute(&output),
        Commands::Vars(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
