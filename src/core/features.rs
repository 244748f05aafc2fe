// @file: src/core/features.rs
// @description: Order-flow features (cvd, imbalance, tape speed, next-bar success) over one symbol's candles.
// @author: LAS.

use crate::core::error::FeatureError;
use crate::core::models::{FeatureRow, RawKline};

//
// CONSTANTS
//

const NEUTRAL_IMBALANCE: f64 = 0.5;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

//
// PUBLIC INTERFACE
//

/// Builds feature rows for a single symbol's series, in the order received.
///
/// Running values (`cvd`) and the series-wide `tape_speed` are scoped to the
/// slice passed in, so callers must invoke this once per symbol before
/// stacking results. An empty series has no span to measure tape speed
/// over and is rejected.
pub fn build_features(klines: &[RawKline]) -> Result<Vec<FeatureRow>, FeatureError> {
    if klines.is_empty() {
        return Err(FeatureError::EmptySeries);
    }

    // #1. Coerce the numeric columns up front
    let n = klines.len();
    let mut closes: Vec<f64> = Vec::with_capacity(n);
    let mut volumes: Vec<f64> = Vec::with_capacity(n);
    let mut taker_buys: Vec<f64> = Vec::with_capacity(n);

    for (row, k) in klines.iter().enumerate() {
        closes.push(coerce(row, "close", &k.close)?);
        volumes.push(coerce(row, "volume", &k.volume)?);
        taker_buys.push(coerce(row, "taker_buy_base_asset_volume", &k.taker_buy_base_asset_volume)?);
    }

    // #2. Series-wide tape speed (one scalar for every row)
    let tape_speed = tape_speed(klines);

    // #3. Row-wise features with a running cvd
    let mut rows: Vec<FeatureRow> = Vec::with_capacity(n);
    let mut cvd: f64 = 0.0;

    for (i, k) in klines.iter().enumerate() {
        let volume = volumes[i];
        let taker_buy = taker_buys[i];

        let is_buyer: u8 = if taker_buy > volume / 2.0 { 1 } else { 0 };
        let delta = if is_buyer == 1 { volume } else { -volume };
        cvd += delta;

        let imbalance = if volume == 0.0 {
            NEUTRAL_IMBALANCE
        } else {
            taker_buy / volume
        };

        let success = closes
            .get(i + 1)
            .map(|next| if *next > closes[i] { 1 } else { 0 });

        rows.push(FeatureRow {
            symbol: k.symbol.clone(),
            timestamp: k.open_time,
            close: k.close.clone(),
            volume,
            price: closes[i],
            is_buyer,
            delta,
            cvd,
            imbalance,
            tape_speed,
            open_interest: 0.0,
            funding_rate: 0.0,
            volume_profile: 0.0,
            success,
        });
    }

    Ok(rows)
}

/// Total trade count divided by the hours between the first and last open time.
///
/// A single-candle series spans zero hours and yields `inf` (or `NaN` with no trades).
pub fn tape_speed(klines: &[RawKline]) -> f64 {
    let (first, last) = match (klines.first(), klines.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return f64::NAN,
    };

    let elapsed_ms = (last.open_time - first.open_time).num_milliseconds() as f64;
    let elapsed_hours = elapsed_ms / MILLIS_PER_HOUR;
    let total_trades: u64 = klines.iter().map(|k| k.number_of_trades).sum();

    total_trades as f64 / elapsed_hours
}

//
// INTERNAL HELPERS
//

fn coerce(row: usize, column: &'static str, raw: &str) -> Result<f64, FeatureError> {
    raw.trim().parse::<f64>().map_err(|_| FeatureError::NotNumeric {
        row,
        column,
        value: raw.to_string(),
    })
}
