//! HTML to Sail conversion engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Entry points** - [`convert_to_sail`] and [`convert_with_options`]
//! - **Renderer** - the tree walk in [`render`] that maps documents, elements
//!   and text onto Sail lines
//! - **Error reporting** - a single [`InvalidMarkupError`] for anything the
//!   parser could not turn into a tree
//!
//! Parsing is delegated to `sail-html`; conversion never mutates the tree and
//! two calls never share state.

pub mod render;

pub use render::Renderer;
pub use sail_html::{ParseError, ParseIssue, ParseMode};

use sail_html::HtmlParser;
use thiserror::Error;
use tracing::{debug, debug_span};

/// The one error conversion reports: the parser failed to produce a tree.
#[derive(Debug, Error)]
#[error("Invalid HTML structure")]
pub struct InvalidMarkupError {
    #[from]
    source: ParseError,
}

impl InvalidMarkupError {
    /// The underlying parser failure.
    #[must_use]
    pub const fn parse_error(&self) -> &ParseError {
        &self.source
    }
}

/// Conversion settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Parse mode; [`ParseMode::Auto`] classifies the input by its prefix.
    pub mode: ParseMode,
    /// Reject input the parser only accepted after recovering from errors.
    pub strict: bool,
}

impl ConvertOptions {
    /// Force a parse mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable strict parsing.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict = true;
        self
    }

    /// The html5ever front end configured with these options.
    #[must_use]
    pub fn parser(self) -> HtmlParser {
        let parser = HtmlParser::new().with_mode(self.mode);
        if self.strict {
            parser.with_strict_mode()
        } else {
            parser
        }
    }
}

/// Output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Sail text, trimmed, without a trailing newline.
    pub output: String,
    /// The mode the input was parsed in.
    pub mode: ParseMode,
    /// Errors the parser recovered from.
    pub issues: Vec<ParseIssue>,
}

/// Convert `html` to Sail with default options.
///
/// ```ignore
/// assert_eq!(convert_to_sail(r#"<div id="x">hello</div>"#)?, ";div#x: hello");
/// ```
///
/// # Errors
///
/// Returns [`InvalidMarkupError`] if the parser cannot produce a tree.
pub fn convert_to_sail(html: &str) -> Result<String, InvalidMarkupError> {
    convert_with_options(html, &ConvertOptions::default()).map(|conversion| conversion.output)
}

/// Convert `html` to Sail and report how it was parsed.
///
/// Fragments render each top-level node at indentation 0; documents render
/// the Document node, including any `html`/`head`/`body` the parser injected.
///
/// # Errors
///
/// Returns [`InvalidMarkupError`] if the parser cannot produce a tree, or in
/// strict mode if it reported any error.
pub fn convert_with_options(
    html: &str,
    options: &ConvertOptions,
) -> Result<Conversion, InvalidMarkupError> {
    let span = debug_span!("convert", mode = %options.mode, strict = options.strict);
    let _enter = span.enter();

    let parsed = options.parser().parse(html)?;
    let renderer = Renderer::new(&parsed.tree);
    let output = match parsed.mode {
        ParseMode::Fragment => renderer.render_fragment(),
        ParseMode::Document | ParseMode::Auto => renderer.render_document(),
    };
    debug!(mode = %parsed.mode, bytes = output.len(), "rendered sail");

    Ok(Conversion {
        output,
        mode: parsed.mode,
        issues: parsed.issues,
    })
}
