// @file: src/tests/mod.rs
// @description: Test suite: feature properties, fetch fallback, driver scenarios, wire parsing, local HTTP paging, CSV io.
// @author: LAS.

mod storage_io;
pub(crate) mod support;
