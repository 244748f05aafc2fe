// @file: src/tests/support.rs
// @description: Scripted in-memory KlineSource and candle builders shared by the test modules.
// @author: LAS.

use crate::core::error::FetchError;
use crate::core::interfaces::KlineSource;
use crate::core::models::{KlineInterval, RawKline};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

//
// CANDLE BUILDERS
//

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

// One hourly candle; index `i` sets the open time to base + i hours.
pub fn kline(symbol: &str, i: i64, close: &str, volume: &str, taker_buy: &str, trades: u64) -> RawKline {
    let open_time = base_time() + Duration::hours(i);
    RawKline {
        symbol: symbol.to_string(),
        open_time,
        open: close.to_string(),
        high: close.to_string(),
        low: close.to_string(),
        close: close.to_string(),
        volume: volume.to_string(),
        close_time_ms: open_time.timestamp_millis() + 3_599_999,
        quote_asset_volume: "0".to_string(),
        number_of_trades: trades,
        taker_buy_base_asset_volume: taker_buy.to_string(),
        taker_buy_quote_asset_volume: "0".to_string(),
        ignore: "0".to_string(),
    }
}

pub fn series(symbol: &str, n: i64) -> Vec<RawKline> {
    (0..n)
        .map(|i| {
            let close = format!("{}", 100 + (i % 3));
            kline(symbol, i, &close, "10", if i % 2 == 0 { "7" } else { "3" }, 5)
        })
        .collect()
}

//
// SCRIPTED SOURCE
//

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub symbol: String,
    pub start_ms: i64,
    pub end_ms: Option<i64>,
}

pub enum Reply {
    Klines(Vec<RawKline>),
    Status(u16),
}

pub struct ScriptedSource {
    ping_status: Option<u16>,
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    pub calls: Mutex<Vec<Call>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        ScriptedSource {
            ping_status: None,
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    // Ping answers with this HTTP status (e.g. 504 for a gateway timeout).
    pub fn failing_ping(mut self, status: u16) -> Self {
        self.ping_status = Some(status);
        self
    }

    pub fn reply(self, symbol: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl KlineSource for ScriptedSource {
    async fn ping(&self) -> Result<(), FetchError> {
        match self.ping_status {
            Some(code) => Err(FetchError::HttpStatus { code, body: "timeout".to_string() }),
            None => Ok(()),
        }
    }

    async fn historical_klines(
        &self,
        symbol: &str,
        _interval: KlineInterval,
        start_ms: i64,
        end_ms: Option<i64>,
    ) -> Result<Vec<RawKline>, FetchError> {
        self.calls.lock().unwrap().push(Call {
            symbol: symbol.to_string(),
            start_ms,
            end_ms,
        });

        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(symbol)
            .and_then(|q| q.pop_front());

        match next {
            Some(Reply::Klines(k)) => Ok(k),
            Some(Reply::Status(code)) => Err(FetchError::HttpStatus { code, body: String::new() }),
            None => Err(FetchError::InvalidPayload(format!("no scripted reply for {}", symbol))),
        }
    }
}
