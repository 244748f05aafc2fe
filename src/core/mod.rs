// @file: src/core/mod.rs
// @description: Exports domain logic and data structures.
// @author: LAS.

pub mod error;
pub mod features;
pub mod interfaces;
pub mod models;
pub mod pipeline;
