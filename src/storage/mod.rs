// @file: src/storage/mod.rs
// @description: CSV input (symbol list) and output (feature dataset).
// @author: LAS.

pub mod dataset;
pub mod symbols;
