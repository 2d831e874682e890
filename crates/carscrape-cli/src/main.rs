mod output;
mod report;
mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "carscrape")]
#[command(about = "Harvest vehicle listings from a paginated catalog into CSV and XLSX")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover listing URLs, extract every listing, write the dataset
    Run(RunArgs),
    /// Print the discovered listing URLs without fetching detail pages
    Discover(CrawlArgs),
    /// Fetch one listing page and print the extracted record as JSON
    Extract {
        /// Detail page URL
        url: String,
    },
}

/// Crawl settings that override the environment configuration.
#[derive(Debug, Default, Args)]
struct CrawlArgs {
    /// Highest index page to visit (pages 1..=N)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,
    /// Catalog origin, e.g. `https://www.avtovitrin.com`
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    #[command(flatten)]
    crawl: CrawlArgs,
    /// Directory for the output files
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// File name stem for `<stem>.csv` and `<stem>.xlsx`
    #[arg(long)]
    stem: Option<String>,
    /// Skip the XLSX output
    #[arg(long)]
    no_xlsx: bool,
    /// Also write the completion statistics as JSON to this path
    #[arg(long)]
    stats_json: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = carscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Run(args) => {
            run::apply_run_overrides(&mut config, &args);
            run::run_scrape(&config, &args).await?;
        }
        Commands::Discover(crawl) => {
            run::apply_crawl_overrides(&mut config, &crawl);
            run::run_discover(&config).await?;
        }
        Commands::Extract { url } => run::run_extract(&config, &url).await?,
    }

    Ok(())
}
