//! Common utilities for the Sail converter.
//!
//! This crate provides shared infrastructure used by the converter crates:
//! - **Warning System** - colored, deduplicated terminal output for parse issues

pub mod warning;
