// @file: src/connectors/binance_rest.rs
// @description: HTTP client for the Binance futures kline history and the exchange ping.
// @author: LAS.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use std::env;
use tokio::time::{sleep, Duration};
use url::Url;

use crate::core::error::FetchError;
use crate::core::interfaces::KlineSource;
use crate::core::models::{KlineInterval, RawKline};
use crate::utils::config::AppConfig;
use crate::utils::time::millis_to_utc;

//
// CONSTANTS
//

const PING_ENDPOINT: &str = "/api/v3/ping";
const KLINES_ENDPOINT: &str = "/fapi/v1/klines";
const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const USER_AGENT: &str = "kline-dataset";
const KLINE_FIELD_COUNT: usize = 12;

//
// CREDENTIALS
//

#[derive(Clone, Default)]
pub struct BinanceCredentials {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl BinanceCredentials {
    pub fn from_env() -> Self {
        BinanceCredentials {
            api_key: env::var("BINANCE_API_KEY").ok().filter(|v| !v.is_empty()),
            api_secret: env::var("BINANCE_API_SECRET").ok().filter(|v| !v.is_empty()),
        }
    }
}

// Never print the secret.
impl std::fmt::Debug for BinanceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

//
// CLIENT
//

pub struct BinanceFuturesClient {
    http: Client,
    ping_url: Url,
    klines_url: Url,
    page_limit: usize,
    pages_per_pause: usize,
    page_pause: Duration,
}

impl BinanceFuturesClient {
    pub fn new(config: &AppConfig, credentials: BinanceCredentials) -> Result<Self, FetchError> {
        // #1. Resolve endpoints
        let ping_url: Url = Url::parse(&config.spot_rest_url)?.join(PING_ENDPOINT)?;
        let klines_url: Url = Url::parse(&config.futures_rest_url)?.join(KLINES_ENDPOINT)?;

        // #2. Optional API key header (all endpoints used here are public, nothing is signed)
        let mut headers = HeaderMap::new();
        match (&credentials.api_key, &credentials.api_secret) {
            (Some(key), secret) => {
                if secret.is_none() {
                    warn!("BINANCE_API_KEY is set without BINANCE_API_SECRET");
                }
                let value = HeaderValue::from_str(key)
                    .map_err(|e| FetchError::InvalidPayload(format!("API key header: {}", e)))?;
                headers.insert(API_KEY_HEADER, value);
            }
            (None, Some(_)) => warn!("BINANCE_API_SECRET is set without BINANCE_API_KEY"),
            (None, None) => debug!("No Binance credentials configured, using public endpoints"),
        }

        let http: Client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            ping_url,
            klines_url,
            page_limit: config.kline_page_limit.max(1),
            pages_per_pause: config.pages_per_pause,
            page_pause: Duration::from_millis(config.page_pause_ms),
        })
    }

    //
    // INTERNAL REQUESTS
    //

    async fn get_json(&self, url: &Url, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let response = self.http.get(url.clone()).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus { code: status.as_u16(), body });
        }

        Ok(response.json().await?)
    }

    async fn fetch_page(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_ms: i64,
        end_ms: Option<i64>,
        limit: usize,
    ) -> Result<Vec<RawKline>, FetchError> {
        let query = page_query(symbol, interval, start_ms, end_ms, limit);
        let json: Value = self.get_json(&self.klines_url, &query).await?;
        parse_kline_rows(symbol, &json)
    }

    // Open time of the first candle the market ever produced, if any.
    async fn earliest_valid_timestamp(
        &self,
        symbol: &str,
        interval: KlineInterval,
    ) -> Result<Option<i64>, FetchError> {
        let first = self.fetch_page(symbol, interval, 0, None, 1).await?;
        Ok(first.first().map(|k| k.open_time.timestamp_millis()))
    }
}

#[async_trait]
impl KlineSource for BinanceFuturesClient {
    async fn ping(&self) -> Result<(), FetchError> {
        self.get_json(&self.ping_url, &[]).await.map(|_| ())
    }

    async fn historical_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_ms: i64,
        end_ms: Option<i64>,
    ) -> Result<Vec<RawKline>, FetchError> {
        // #1. Clamp the start to the first listed candle
        let earliest = match self.earliest_valid_timestamp(symbol, interval).await? {
            Some(ts) => ts,
            None => {
                warn!("{} has no {} klines at all", symbol, interval);
                return Ok(Vec::new());
            }
        };
        let mut cursor: i64 = start_ms.max(earliest);

        // #2. Page forward until a short or empty page
        let mut klines: Vec<RawKline> = Vec::new();
        let mut pages: usize = 0;

        loop {
            if matches!(end_ms, Some(end) if cursor > end) {
                break;
            }

            let page = self
                .fetch_page(symbol, interval, cursor, end_ms, self.page_limit)
                .await?;
            pages += 1;
            debug!("{} page {}: {} klines from {}", symbol, pages, page.len(), cursor);

            let last_open = match page.last() {
                Some(k) => k.open_time.timestamp_millis(),
                None => break,
            };
            let full_page = page.len() >= self.page_limit;
            klines.extend(page);

            if !full_page {
                break;
            }
            cursor = last_open + 1;

            // #3. Rate-limit courtesy
            if self.pages_per_pause > 0 && pages % self.pages_per_pause == 0 {
                sleep(self.page_pause).await;
            }
        }

        Ok(klines)
    }
}

//
// INTERNAL HELPERS
//

pub(crate) fn page_query(
    symbol: &str,
    interval: KlineInterval,
    start_ms: i64,
    end_ms: Option<i64>,
    limit: usize,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("symbol", symbol.to_uppercase()),
        ("interval", interval.as_str().to_string()),
        ("startTime", start_ms.to_string()),
    ];
    if let Some(end) = end_ms {
        query.push(("endTime", end.to_string()));
    }
    query.push(("limit", limit.to_string()));
    query
}

/// Parses the Binance kline payload:
/// `[[open_time, open, high, low, close, volume, close_time, quote_volume,
///    trades, taker_base, taker_quote, ignore], ...]`
pub fn parse_kline_rows(symbol: &str, json: &Value) -> Result<Vec<RawKline>, FetchError> {
    let raw_list = json
        .as_array()
        .ok_or_else(|| FetchError::InvalidPayload("expected array of klines".to_string()))?;

    let mut klines: Vec<RawKline> = Vec::with_capacity(raw_list.len());

    for (idx, item) in raw_list.iter().enumerate() {
        let arr = item
            .as_array()
            .ok_or_else(|| FetchError::InvalidPayload(format!("kline {} is not an array", idx)))?;

        if arr.len() < KLINE_FIELD_COUNT {
            return Err(FetchError::InvalidPayload(format!(
                "kline {} has {} fields, expected {}",
                idx,
                arr.len(),
                KLINE_FIELD_COUNT
            )));
        }

        // Decimal fields arrive as strings, counters and times as integers
        let text = |field: usize| -> Result<String, FetchError> {
            match &arr[field] {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(FetchError::InvalidPayload(format!(
                    "kline {} field {}: unexpected {}",
                    idx, field, other
                ))),
            }
        };
        let integer = |field: usize| -> Result<i64, FetchError> {
            arr[field].as_i64().ok_or_else(|| {
                FetchError::InvalidPayload(format!("kline {} field {}: expected integer", idx, field))
            })
        };

        let open_time_ms = integer(0)?;
        let open_time = millis_to_utc(open_time_ms).ok_or_else(|| {
            FetchError::InvalidPayload(format!("kline {}: open time {} out of range", idx, open_time_ms))
        })?;
        let trades = integer(8)?;

        klines.push(RawKline {
            symbol: symbol.to_string(),
            open_time,
            open: text(1)?,
            high: text(2)?,
            low: text(3)?,
            close: text(4)?,
            volume: text(5)?,
            close_time_ms: integer(6)?,
            quote_asset_volume: text(7)?,
            number_of_trades: u64::try_from(trades).map_err(|_| {
                FetchError::InvalidPayload(format!("kline {}: negative trade count", idx))
            })?,
            taker_buy_base_asset_volume: text(9)?,
            taker_buy_quote_asset_volume: text(10)?,
            ignore: text(11)?,
        });
    }

    Ok(klines)
}
