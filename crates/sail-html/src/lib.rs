//! HTML parsing front end for the Sail converter.
//!
//! # Scope
//!
//! This crate binds [`html5ever`] and copies its output into a [`sail_dom::DomTree`]:
//! - **Mode detection** - full document or fragment, from the input prefix
//! - **Fragment parsing** - no implicit `html`/`head`/`body` wrapper
//! - **Document parsing** - the parser may inject structural elements
//! - **Strict mode** - parse errors the parser recovered from become fatal
//! - **Depth limit** - markup nested deeper than [`MAX_DEPTH`] is rejected
//! - **Tree dump** - indented debugging view of a parsed tree
//!
//! # Not Yet Implemented
//!
//! - Template contents (`<template>` children are parsed into a separate
//!   fragment by html5ever and are not copied)
//! - Encoding sniffing; input is always UTF-8

mod dump;
mod error;
pub mod parser;

pub use dump::{format_tree, print_tree};
pub use error::ParseError;
pub use parser::{HtmlParser, MAX_DEPTH, ParseIssue, ParseMode, ParsedDocument};
