// @file: src/connectors/history.rs
// @description: Ranged kline fetch with a single open-ended fallback from a fixed start date.
// @author: LAS.

use log::{info, warn};
use crate::core::error::FetchError;
use crate::core::interfaces::KlineSource;
use crate::core::models::{KlineInterval, RawKline};
use crate::utils::time::parse_date_to_millis;

//
// PUBLIC INTERFACE
//

/// Fetches `symbol` for `[start, end]`. If that fails for any reason, retries
/// once from `fallback_start` with no end bound. The retry is not guarded.
pub async fn fetch_history<S: KlineSource + ?Sized>(
    source: &S,
    symbol: &str,
    interval: KlineInterval,
    start: &str,
    end: Option<&str>,
    fallback_start: &str,
) -> Result<Vec<RawKline>, FetchError> {
    // #1. Ranged request (date parsing counts as part of the request)
    let ranged = match resolve_range(start, end) {
        Ok((start_ms, end_ms)) => source.historical_klines(symbol, interval, start_ms, end_ms).await,
        Err(e) => Err(e),
    };

    // #2. One open-ended retry
    let klines = match ranged {
        Ok(klines) => klines,
        Err(e) => {
            warn!(
                "Could not fetch data for the requested time frame: {}. Fetching all available data.",
                e
            );
            let fallback_ms = parse_date_to_millis(fallback_start)?;
            source.historical_klines(symbol, interval, fallback_ms, None).await?
        }
    };

    info!("{}: fetched {} {} klines", symbol, klines.len(), interval);
    Ok(klines)
}

//
// INTERNAL HELPERS
//

fn resolve_range(start: &str, end: Option<&str>) -> Result<(i64, Option<i64>), FetchError> {
    let start_ms = parse_date_to_millis(start)?;
    let end_ms = end.map(parse_date_to_millis).transpose()?;
    Ok((start_ms, end_ms))
}
