use crate::app_config::AppConfig;
use crate::labels::{load_labels, LabelConfig};
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Resolve the label dictionary for a run: the YAML file named by
/// `labels_path` when set, otherwise the built-in default.
///
/// # Errors
///
/// Returns `ConfigError` if the configured file cannot be loaded or validated.
pub fn load_label_config(config: &AppConfig) -> Result<LabelConfig, ConfigError> {
    match &config.labels_path {
        Some(path) => load_labels(path),
        None => Ok(LabelConfig::default()),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = or_default("CARSCRAPE_BASE_URL", "https://www.avtovitrin.com");
    let base_url = base_url.trim_end_matches('/').to_string();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "CARSCRAPE_BASE_URL".to_string(),
            reason: format!("\"{base_url}\" is not an http(s) URL"),
        });
    }

    let index_path = or_default("CARSCRAPE_INDEX_PATH", "/new-ads.php");
    let max_pages = parse_u32("CARSCRAPE_MAX_PAGES", "12")?;
    if max_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CARSCRAPE_MAX_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let detail_path_marker = or_default("CARSCRAPE_DETAIL_PATH_MARKER", "cars/");
    let currency_marker = or_default("CARSCRAPE_CURRENCY_MARKER", "AZN");

    let log_level = or_default("CARSCRAPE_LOG_LEVEL", "info");
    let labels_path = lookup("CARSCRAPE_LABELS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let output_dir = PathBuf::from(or_default("CARSCRAPE_OUTPUT_DIR", "."));
    let output_stem = or_default("CARSCRAPE_OUTPUT_STEM", "car_listings");

    let scraper_user_agent = or_default("CARSCRAPE_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_request_timeout_secs = parse_u64("CARSCRAPE_REQUEST_TIMEOUT_SECS", "30")?;
    if scraper_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CARSCRAPE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let scraper_index_delay_ms = parse_u64("CARSCRAPE_INDEX_DELAY_MS", "1000")?;
    let scraper_detail_delay_ms = parse_u64("CARSCRAPE_DETAIL_DELAY_MS", "1500")?;

    Ok(AppConfig {
        base_url,
        index_path,
        max_pages,
        detail_path_marker,
        currency_marker,
        log_level,
        labels_path,
        output_dir,
        output_stem,
        scraper_user_agent,
        scraper_request_timeout_secs,
        scraper_index_delay_ms,
        scraper_detail_delay_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
