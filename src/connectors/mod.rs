// @file: src/connectors/mod.rs
// @description: Exchange connectors and the generalized history fetcher.
// @author: LAS.

pub mod binance_rest;
pub mod history;
