//! oxide-yugabyte CLI
//!
//! Reads DDL requests from a JSON file and prints the YugabyteDB statements.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use oxide_yugabyte::prelude::*;

/// YugabyteDB DDL generator.
#[derive(Parser)]
#[command(name = "oxide-yugabyte")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON capability table overriding the YugabyteDB defaults.
    #[arg(short, long, env = "OXIDE_YUGABYTE_CAPABILITIES")]
    capabilities: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate SQL for the requests in a JSON file.
    Generate {
        /// File holding a JSON array of requests.
        file: PathBuf,
    },

    /// Print the active capability table as JSON.
    Capabilities,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the SQL.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(path) = &cli.capabilities {
        debug!(path = %path.display(), "Loading capability table");
    }
    let capabilities = cli
        .capabilities
        .as_deref()
        .map(Capabilities::load)
        .transpose()?
        .unwrap_or_default();
    let generator = YugabyteQueryGenerator::with_capabilities(capabilities);

    match cli.command {
        Commands::Generate { file } => {
            let requests = load_requests(&file)?;
            info!(
                "Generating SQL for {} request(s) from {}",
                requests.len(),
                file.display()
            );
            // Nothing reaches stdout unless the whole batch succeeds.
            let statements = generator.generate_all(&requests)?;
            debug!(statements = statements.len(), "Batch done");
            for statement in statements {
                println!("{statement};");
            }
        }

        Commands::Capabilities => {
            println!("{}", serde_json::to_string_pretty(generator.capabilities())?);
        }
    }

    Ok(())
}
