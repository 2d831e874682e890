//! Command handlers. Each one builds the fetcher from the resolved config and
//! drives the scraper library; output writers and the summary live in
//! sibling modules.

use anyhow::Context;
use carscrape_core::AppConfig;
use carscrape_scraper::{
    discover_listing_urls, harvest, harvest_one, CompletionStats, DiscoveryConfig, Extractor,
    HarvestConfig, HttpFetcher,
};

use crate::output::{write_csv_file, write_stats_json, write_xlsx_file};
use crate::report::print_summary;
use crate::{CrawlArgs, RunArgs};

pub(crate) fn apply_crawl_overrides(config: &mut AppConfig, crawl: &CrawlArgs) {
    if let Some(max_pages) = crawl.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(base_url) = &crawl.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
}

pub(crate) fn apply_run_overrides(config: &mut AppConfig, args: &RunArgs) {
    apply_crawl_overrides(config, &args.crawl);
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if let Some(stem) = &args.stem {
        config.output_stem.clone_from(stem);
    }
}

fn build_fetcher(config: &AppConfig) -> anyhow::Result<HttpFetcher> {
    HttpFetcher::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )
    .context("failed to build HTTP client")
}

/// Full pipeline: discover, harvest, summarize, then write CSV before XLSX.
///
/// # Errors
///
/// Returns an error if the label dictionary cannot be loaded, the crawl
/// configuration is invalid, or an output file cannot be written. Per-page
/// and per-listing fetch failures are logged and never abort the run.
pub(crate) async fn run_scrape(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let labels = carscrape_core::load_label_config(config)?;
    let fetcher = build_fetcher(config)?;

    tracing::info!(
        base_url = %config.base_url,
        max_pages = config.max_pages,
        "starting discovery"
    );
    let urls = discover_listing_urls(&fetcher, &DiscoveryConfig::from_app_config(config)).await?;
    if urls.is_empty() {
        tracing::warn!("no listing URLs discovered; writing an empty dataset");
    }

    let extractor = Extractor::from_app_config(config, labels);
    let records = harvest(
        &fetcher,
        &extractor,
        &urls,
        HarvestConfig::from_app_config(config),
    )
    .await;

    let stats = CompletionStats::compute(&records);
    print_summary(&stats);

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let csv_path = config
        .output_dir
        .join(format!("{}.csv", config.output_stem));
    write_csv_file(&csv_path, &records)?;
    println!("wrote {} records to {}", records.len(), csv_path.display());

    if args.no_xlsx {
        tracing::info!("xlsx output disabled");
    } else {
        let xlsx_path = config
            .output_dir
            .join(format!("{}.xlsx", config.output_stem));
        write_xlsx_file(&xlsx_path, &records)?;
        println!("wrote {} records to {}", records.len(), xlsx_path.display());
    }

    if let Some(path) = &args.stats_json {
        write_stats_json(path, &stats)?;
        println!("wrote statistics to {}", path.display());
    }

    Ok(())
}

/// Dry run: prints the discovered URLs, one per line.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the crawl
/// configuration is invalid.
pub(crate) async fn run_discover(config: &AppConfig) -> anyhow::Result<()> {
    let fetcher = build_fetcher(config)?;
    let urls = discover_listing_urls(&fetcher, &DiscoveryConfig::from_app_config(config)).await?;

    for url in &urls {
        println!("{url}");
    }
    eprintln!("{} unique listing URLs", urls.len());

    Ok(())
}

/// Extracts one listing and prints it as pretty JSON.
///
/// # Errors
///
/// Returns an error if the label dictionary cannot be loaded or the page
/// fails to fetch. A failed record is still printed before the error.
pub(crate) async fn run_extract(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let labels = carscrape_core::load_label_config(config)?;
    let fetcher = build_fetcher(config)?;
    let extractor = Extractor::from_app_config(config, labels);

    let record = harvest_one(&fetcher, &extractor, url).await;
    println!("{}", serde_json::to_string_pretty(&record)?);

    if let Some(error) = record.error() {
        anyhow::bail!("failed to fetch {url}: {error}");
    }
    Ok(())
}
