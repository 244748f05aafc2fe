// @file: src/core/models.rs
// @description: Candle rows as received from the exchange and the feature rows derived from them.
// @author: LAS.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;


//
// KLINE INTERVAL
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KlineInterval {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    #[default]
    OneHour,
    TwoHours,
    FourHours,
    SixHours,
    EightHours,
    TwelveHours,
    OneDay,
    ThreeDays,
    OneWeek,
    OneMonth,
}

impl KlineInterval {
    // Wire identifier expected by the Binance `interval` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            KlineInterval::OneMinute => "1m",
            KlineInterval::ThreeMinutes => "3m",
            KlineInterval::FiveMinutes => "5m",
            KlineInterval::FifteenMinutes => "15m",
            KlineInterval::ThirtyMinutes => "30m",
            KlineInterval::OneHour => "1h",
            KlineInterval::TwoHours => "2h",
            KlineInterval::FourHours => "4h",
            KlineInterval::SixHours => "6h",
            KlineInterval::EightHours => "8h",
            KlineInterval::TwelveHours => "12h",
            KlineInterval::OneDay => "1d",
            KlineInterval::ThreeDays => "3d",
            KlineInterval::OneWeek => "1w",
            KlineInterval::OneMonth => "1M",
        }
    }
}

impl FromStr for KlineInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "1M" (month) and "1m" (minute) differ only by case, so no lowercasing here
        let interval = match s.trim() {
            "1m" => KlineInterval::OneMinute,
            "3m" => KlineInterval::ThreeMinutes,
            "5m" => KlineInterval::FiveMinutes,
            "15m" => KlineInterval::FifteenMinutes,
            "30m" => KlineInterval::ThirtyMinutes,
            "1h" => KlineInterval::OneHour,
            "2h" => KlineInterval::TwoHours,
            "4h" => KlineInterval::FourHours,
            "6h" => KlineInterval::SixHours,
            "8h" => KlineInterval::EightHours,
            "12h" => KlineInterval::TwelveHours,
            "1d" => KlineInterval::OneDay,
            "3d" => KlineInterval::ThreeDays,
            "1w" => KlineInterval::OneWeek,
            "1M" => KlineInterval::OneMonth,
            other => return Err(format!("Unsupported kline interval: {}", other)),
        };
        Ok(interval)
    }
}

impl fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


//
// RAW CANDLE
//

// Decimal fields stay as the exchange sent them; coercion happens in the feature builder.
#[derive(Debug, Clone, PartialEq)]
pub struct RawKline {
    pub symbol: String,
    pub open_time: DateTime<Utc>,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub close_time_ms: i64,
    pub quote_asset_volume: String,
    pub number_of_trades: u64,
    pub taker_buy_base_asset_volume: String,
    pub taker_buy_quote_asset_volume: String,
    pub ignore: String,
}


//
// FEATURE ROW
//

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const FEATURE_COLUMNS: [&str; 13] = [
    "timestamp",
    "close",
    "volume",
    "price",
    "is_buyer",
    "delta",
    "cvd",
    "imbalance",
    "tape_speed",
    "open_interest",
    "funding_rate",
    "volume_profile",
    "success",
];

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub close: String,
    pub volume: f64,
    pub price: f64,
    pub is_buyer: u8,
    pub delta: f64,
    pub cvd: f64,
    pub imbalance: f64,
    pub tape_speed: f64,
    pub open_interest: f64,
    pub funding_rate: f64,
    pub volume_profile: f64,
    // None on the last row of a symbol's series: there is no next close to compare against.
    pub success: Option<u8>,
}

impl FeatureRow {
    // Field order matches FEATURE_COLUMNS.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.close.clone(),
            float_cell(self.volume),
            float_cell(self.price),
            self.is_buyer.to_string(),
            float_cell(self.delta),
            float_cell(self.cvd),
            float_cell(self.imbalance),
            float_cell(self.tape_speed),
            float_cell(self.open_interest),
            float_cell(self.funding_rate),
            float_cell(self.volume_profile),
            self.success.map(|s| s.to_string()).unwrap_or_default(),
        ]
    }
}

// Undefined values (NaN, inf) are written as empty cells, like a missing `success`.
fn float_cell(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}


//
// RUN OUTCOME
//

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub symbols: usize,
    pub rows: usize,
    pub output: PathBuf,
}
