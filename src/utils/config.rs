// @file: src/utils/config.rs
// @description: Layered configuration (defaults, optional config file, APP_* env) for the dataset run.
// @author: LAS.

use serde::Deserialize;
use config::{Config, ConfigError, File, Environment};
use crate::core::models::KlineInterval;

//
// DEFAULTS
//

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SYMBOLS_FILE: &str = "symbols.csv";
const DEFAULT_OUTPUT_FILE: &str = "historical_data.csv";
const DEFAULT_INTERVAL: &str = "1h";
const DEFAULT_START_DATE: &str = "1 Jan, 2017";
const DEFAULT_FALLBACK_START_DATE: &str = "1 Jan, 2017";
const DEFAULT_FUTURES_REST_URL: &str = "https://fapi.binance.com";
const DEFAULT_SPOT_REST_URL: &str = "https://api.binance.com";
const DEFAULT_KLINE_PAGE_LIMIT: usize = 1000;
const DEFAULT_PAGES_PER_PAUSE: usize = 3;
const DEFAULT_PAGE_PAUSE_MS: u64 = 1000;

//
// TYPE DEFINITIONS
//

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,

    // Files
    pub symbols_file: String,
    pub output_file: String,
    pub include_symbol_column: bool,

    // Requested Range
    pub interval: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub fallback_start_date: String,

    // Binance Endpoints
    pub futures_rest_url: String,
    pub spot_rest_url: String,

    // Paging
    pub kline_page_limit: usize,
    pub pages_per_pause: usize,
    pub page_pause_ms: u64,
}

impl AppConfig {
    //
    // PUBLIC INTERFACE
    //

    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("log_level", DEFAULT_LOG_LEVEL)?

            // Files
            .set_default("symbols_file", DEFAULT_SYMBOLS_FILE)?
            .set_default("output_file", DEFAULT_OUTPUT_FILE)?
            .set_default("include_symbol_column", false)?

            // Requested Range (end_date has no default: open-ended)
            .set_default("interval", DEFAULT_INTERVAL)?
            .set_default("start_date", DEFAULT_START_DATE)?
            .set_default("fallback_start_date", DEFAULT_FALLBACK_START_DATE)?

            // Binance Endpoints
            .set_default("futures_rest_url", DEFAULT_FUTURES_REST_URL)?
            .set_default("spot_rest_url", DEFAULT_SPOT_REST_URL)?

            // Paging
            .set_default("kline_page_limit", DEFAULT_KLINE_PAGE_LIMIT as i64)?
            .set_default("pages_per_pause", DEFAULT_PAGES_PER_PAUSE as i64)?
            .set_default("page_pause_ms", DEFAULT_PAGE_PAUSE_MS as i64)?

            // File & Env Overrides
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP"));

        let config = builder.build()?;
        let app: AppConfig = config.try_deserialize()?;

        // Reject a bad interval at startup rather than on the first request
        app.interval().map_err(ConfigError::Message)?;
        Ok(app)
    }

    pub fn interval(&self) -> Result<KlineInterval, String> {
        self.interval.parse()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            symbols_file: DEFAULT_SYMBOLS_FILE.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            include_symbol_column: false,
            interval: DEFAULT_INTERVAL.to_string(),
            start_date: DEFAULT_START_DATE.to_string(),
            end_date: None,
            fallback_start_date: DEFAULT_FALLBACK_START_DATE.to_string(),
            futures_rest_url: DEFAULT_FUTURES_REST_URL.to_string(),
            spot_rest_url: DEFAULT_SPOT_REST_URL.to_string(),
            kline_page_limit: DEFAULT_KLINE_PAGE_LIMIT,
            pages_per_pause: DEFAULT_PAGES_PER_PAUSE,
            page_pause_ms: DEFAULT_PAGE_PAUSE_MS,
        }
    }
}
