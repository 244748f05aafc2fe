// @file: src/core/interfaces.rs
// @description: Defines the market-data source trait the fetcher and driver are written against.
// @author: LAS.

use crate::core::error::FetchError;
use crate::core::models::{KlineInterval, RawKline};
use async_trait::async_trait;

//
// TRAIT DEFINITIONS
//

#[async_trait]
pub trait KlineSource: Send + Sync {
    // #1. Lightweight reachability check
    async fn ping(&self) -> Result<(), FetchError>;

    // #2. Every candle for `symbol` opening in [start_ms, end_ms]; an open end means "up to now".
    async fn historical_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_ms: i64,
        end_ms: Option<i64>,
    ) -> Result<Vec<RawKline>, FetchError>;
}
