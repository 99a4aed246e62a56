//! Tree navigator CLI - Main Entry Point
//!
//! Runs exploratory or named searches against a YAML tree fixture, the same
//! way a UI flow would drive the navigator against a live page.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{find, search};

/// Tree navigator CLI
#[derive(Parser)]
#[command(name = "treenav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find any node passing a goal predicate
    Search(search::ExploreArgs),

    /// Find a specific named leaf
    Find(find::FindArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Search(args) => search::execute(args, cli.format).await,
        Commands::Find(args) => find::execute(args, cli.format).await,
        Commands::Version => {
            println!("treenav {}", treenav_navigator::VERSION);
            Ok(true)
        }
    };

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            std::process::exit(2);
        }
    }
}
