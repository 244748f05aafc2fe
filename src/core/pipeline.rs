// @file: src/core/pipeline.rs
// @description: Sequential driver: connectivity check, per-symbol fetch and features, one stacked CSV.
// @author: LAS.

use log::{error, info};
use std::path::PathBuf;
use crate::connectors::binance_rest::{BinanceCredentials, BinanceFuturesClient};
use crate::connectors::history::fetch_history;
use crate::core::error::PipelineError;
use crate::core::features::build_features;
use crate::core::interfaces::KlineSource;
use crate::core::models::{FeatureRow, RunSummary};
use crate::storage::dataset::write_dataset;
use crate::storage::symbols::read_symbols;
use crate::utils::config::AppConfig;

//
// ENTRY POINT
//

// A client that cannot be built (bad endpoint URL, unusable API key) is a configuration problem.
pub fn exchange_client(
    config: &AppConfig,
    credentials: BinanceCredentials,
) -> Result<BinanceFuturesClient, PipelineError> {
    BinanceFuturesClient::new(config, credentials)
        .map_err(|e| PipelineError::Config(format!("Binance client: {}", e)))
}

pub async fn run<S: KlineSource + ?Sized>(
    source: &S,
    config: &AppConfig,
) -> Result<RunSummary, PipelineError> {
    // #1. Connectivity (nothing is read or written if this fails)
    if let Err(e) = source.ping().await {
        error!("Could not connect to Binance API: {}", e);
        return Err(PipelineError::Connectivity(e));
    }

    let interval = config
        .interval()
        .map_err(PipelineError::Config)?;

    // #2. Symbol list
    let symbols: Vec<String> = read_symbols(&PathBuf::from(&config.symbols_file))?;
    info!("Loaded {} symbols from {}", symbols.len(), config.symbols_file);

    // #3. Fetch -> features, one symbol at a time; any failure aborts the run
    let mut blocks: Vec<Vec<FeatureRow>> = Vec::with_capacity(symbols.len());

    for symbol in &symbols {
        println!("Fetching all available data for {}...", symbol);

        let klines = fetch_history(
            source,
            symbol,
            interval,
            &config.start_date,
            config.end_date.as_deref(),
            &config.fallback_start_date,
        )
        .await
        .map_err(|e| PipelineError::Fetch { symbol: symbol.clone(), source: e })?;

        let rows = build_features(&klines)
            .map_err(|e| PipelineError::Features { symbol: symbol.clone(), source: e })?;

        info!("{}: built {} feature rows", symbol, rows.len());
        blocks.push(rows);
    }

    // #4. Stack and write
    if blocks.is_empty() {
        return Err(PipelineError::NothingToWrite);
    }
    let stacked: Vec<FeatureRow> = blocks.into_iter().flatten().collect();

    let output = PathBuf::from(&config.output_file);
    write_dataset(&output, &stacked, config.include_symbol_column)?;
    info!("Wrote {} rows to {}", stacked.len(), output.display());

    Ok(RunSummary {
        symbols: symbols.len(),
        rows: stacked.len(),
        output,
    })
}
