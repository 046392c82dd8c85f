use color_eyre::eyre::{eyre, WrapErr};
use dotenv::dotenv;
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_GEOMETRY_URL: &str =
    "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    /// `None` when the map is turned off
    pub geometry_url: Option<Url>,
    pub timeout: Duration,
}

/// Initializes the application configuration from `.env` and the process
/// environment. CLI flags have already been folded into the environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_url = env::var("DASHBOARD_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let base_url = parse_base_url(&base_url)?;

    let geometry_url = if map_disabled() {
        None
    } else {
        let raw = env::var("GEOMETRY_URL").unwrap_or_else(|_| DEFAULT_GEOMETRY_URL.to_string());
        Some(Url::parse(&raw).wrap_err_with(|| format!("Invalid GEOMETRY_URL: {raw}"))?)
    };

    let timeout = match env::var("HTTP_TIMEOUT_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| eyre!("HTTP_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"))?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    log::debug!("Using dashboard at {base_url}");

    Ok(AppConfig {
        base_url,
        geometry_url,
        timeout: Duration::from_secs(timeout),
    })
}

/// Parses the backend root, making sure relative joins keep any path prefix.
pub fn parse_base_url(raw: &str) -> color_eyre::eyre::Result<Url> {
    let mut url = Url::parse(raw.trim()).wrap_err_with(|| format!("Invalid DASHBOARD_URL: {raw}"))?;
    if url.cannot_be_a_base() {
        return Err(eyre!("DASHBOARD_URL cannot be used as a base: {raw}"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn map_disabled() -> bool {
    env::var("DISABLE_MAP").is_ok_and(|value| !value.is_empty() && value != "0")
}
