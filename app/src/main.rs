#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;

use command::{CommandStrategy, EnrichInput, EnrichStrategy, InitStrategy, VersionStrategy};

#[derive(Parser)]
#[command(name = "prospect")]
#[command(about = "Bulk contact enrichment over an AI search API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a CSV roster with contact information
    Enrich {
        /// Roster file with FirstName, LastName, Title, Organization columns
        input: PathBuf,

        /// API key override (falls back to PERPLEXITY_API_KEY, then config)
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Enrich {
            input,
            api_key,
            model,
        } => {
            EnrichStrategy
                .execute(EnrichInput {
                    input,
                    api_key,
                    model,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
