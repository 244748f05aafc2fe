// @file: src/core/error.rs
// @description: Error types for fetching, feature building, storage and the driver.
// @author: LAS.

use thiserror::Error;


//
// FETCH
//

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("invalid response format: {0}")]
    InvalidPayload(String),
    #[error("unrecognised date: {0}")]
    InvalidDate(String),
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}


//
// FEATURES
//

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("no klines to build features from")]
    EmptySeries,
    #[error("row {row}: column '{column}' is not numeric ('{value}')")]
    NotNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },
}


//
// STORAGE
//

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("symbols file line {line}: missing symbol in first column")]
    MissingSymbol { line: u64 },
}


//
// DRIVER
//

pub const CONNECTIVITY_MESSAGE: &str =
    "Could not connect to Binance API. Please check your internet connection and API keys.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not connect to exchange: {0}")]
    Connectivity(#[source] FetchError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("fetch failed for {symbol}: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: FetchError,
    },
    #[error("feature build failed for {symbol}: {source}")]
    Features {
        symbol: String,
        #[source]
        source: FeatureError,
    },
    #[error("no symbols to process, nothing to write")]
    NothingToWrite,
}

impl PipelineError {
    // Line printed to stdout before a non-zero exit.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Connectivity(_) => CONNECTIVITY_MESSAGE.to_string(),
            PipelineError::Config(reason) => format!("Invalid configuration: {}", reason),
            other => other.to_string(),
        }
    }
}
