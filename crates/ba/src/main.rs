//! BA CLI - Article markup renderer.
//!
//! Provides commands for:
//! - `render`: Render an article to HTML
//! - `toc`: Print the table of contents
//! - `faq`: Print FAQ entries or their JSON-LD structured data

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{FaqArgs, RenderArgs, TocArgs};
use output::Output;

/// BA - Article markup renderer.
#[derive(Parser)]
#[command(name = "ba", version, about)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an article to HTML.
    Render(RenderArgs),
    /// Print the table of contents.
    Toc(TocArgs),
    /// Print FAQ entries.
    Faq(FaqArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Toc(args) => args.execute(),
        Commands::Faq(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
