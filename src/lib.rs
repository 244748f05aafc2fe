// @file: src/lib.rs
// @description: Exposes the modular architecture for the binary and the test suite.
// @author: LAS.

pub mod connectors;
pub mod core;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod tests;
