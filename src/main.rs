// @file: src/main.rs
// @description: Builds historical_data.csv from the symbols in symbols.csv.
// @author: LAS.

use kline_dataset::connectors::binance_rest::BinanceCredentials;
use kline_dataset::core::error::PipelineError;
use kline_dataset::core::pipeline;
use kline_dataset::utils::config::AppConfig;
use log::{error, info};
use std::process;

fn fail(err: PipelineError) -> ! {
    // Connectivity failures are already logged by the pipeline
    if !matches!(err, PipelineError::Connectivity(_)) {
        error!("{}", err);
    }
    println!("{}", err.user_message());
    process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    // 2. Logger: config level by default, RUST_LOG wins when set
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    info!(">>> Kline dataset run starting ({} -> {}) <<<", config.symbols_file, config.output_file);

    // 3. Exchange client
    let client = match pipeline::exchange_client(&config, BinanceCredentials::from_env()) {
        Ok(c) => c,
        Err(e) => fail(e),
    };

    // 4. Run
    match pipeline::run(&client, &config).await {
        Ok(summary) => {
            info!("Done: {} symbols, {} rows", summary.symbols, summary.rows);
            println!("Historical data saved to {}", summary.output.display());
        }
        Err(e) => fail(e),
    }
}
