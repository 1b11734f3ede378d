use crate::error::{config_error, CalResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;

/// Default endpoint for the borough calendar
pub const DEFAULT_BASE_URL: &str = "https://glenrocknj.net/index.php";

/// Default DPCalendar menu item id
pub const DEFAULT_ITEM_ID: u32 = 965;

/// Default result limit (0 = unbounded)
pub const DEFAULT_LIMIT: u32 = 0;

/// Main configuration structure for the application
#[derive(Debug, Clone)]
pub struct Config {
    /// Calendar endpoint URL
    pub base_url: String,
    /// DPCalendar menu item id to query
    pub item_id: u32,
    /// Result limit passed to the API (0 = unbounded)
    pub limit: u32,
    /// Lowercase title filter words; empty disables filtering
    pub title_filter: Vec<String>,
    /// Optional timeout applied to the HTTP session by the caller
    pub http_timeout_secs: Option<u64>,
}

/// Shape of the optional config/filters.toml file
#[derive(Debug, Deserialize)]
struct FilterFile {
    filters: Vec<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> CalResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let base_url =
            env::var("BOROCAL_BASE_URL").unwrap_or_else(|_| String::from(DEFAULT_BASE_URL));

        let item_id = match env::var("BOROCAL_ITEM_ID") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| config_error("Invalid BOROCAL_ITEM_ID format"))?,
            Err(_) => DEFAULT_ITEM_ID,
        };

        let limit = match env::var("BOROCAL_LIMIT") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| config_error("Invalid BOROCAL_LIMIT format"))?,
            Err(_) => DEFAULT_LIMIT,
        };

        let http_timeout_secs = match env::var("BOROCAL_HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| config_error("Invalid BOROCAL_HTTP_TIMEOUT_SECS format"))?,
            ),
            Err(_) => None,
        };

        // Filter words from the environment, then merged with the optional file
        let mut title_filter = match env::var("BOROCAL_TITLE_FILTER") {
            Ok(raw) => parse_filter_words(&raw),
            Err(_) => Vec::new(),
        };

        // Load additional filter words from file if it exists
        if let Ok(content) = fs::read_to_string("config/filters.toml") {
            let file: FilterFile = toml::from_str(&content)?;
            for word in file.filters {
                let word = word.trim().to_lowercase();
                if !word.is_empty() && !title_filter.contains(&word) {
                    title_filter.push(word);
                }
            }
        }

        Ok(Config {
            base_url,
            item_id,
            limit,
            title_filter,
            http_timeout_secs,
        })
    }
}

/// Split a comma-separated word list, trimming and lowercasing each entry
pub fn parse_filter_words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    for word in raw.split(',') {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !words.contains(&word) {
            words.push(word);
        }
    }
    words
}
