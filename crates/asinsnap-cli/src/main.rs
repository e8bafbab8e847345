mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "asinsnap")]
#[command(about = "Scrapes product detail pages into per-identifier JSON records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a product page for every identifier in a CSV file
    Scrape {
        /// CSV file listing the product identifiers to scrape
        #[arg(long)]
        input: PathBuf,

        /// Header of the CSV column holding the identifiers
        #[arg(long, default_value = "ProductId")]
        id_column: String,

        /// Re-scrape and overwrite records that already exist on disk
        #[arg(long)]
        replace: bool,

        /// Maximum number of pages fetched concurrently (defaults to the
        /// configured worker count)
        #[arg(long)]
        workers: Option<usize>,

        /// Directory records are written to (defaults to the configured
        /// output directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = asinsnap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape {
            input,
            id_column,
            replace,
            workers,
            output,
        } => scrape::run(&config, &input, &id_column, replace, workers, output).await,
    }
}
