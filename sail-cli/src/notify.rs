//! User-facing status messages, written to stderr so stdout carries only output.

use owo_colors::OwoColorize;
use sail_common::warning::warn_once;
use sail_convert::{InvalidMarkupError, ParseIssue};

/// Shown after the converted text was written.
pub const SUCCESS_MESSAGE: &str = "HTML converted to Sail successfully";

/// Prefix of every conversion failure message.
pub const FAILURE_PREFIX: &str = "Failed to convert HTML to Sail";

/// Report a successful conversion.
pub fn success() {
    eprintln!("{}", SUCCESS_MESSAGE.green());
}

/// The failure line for `err`, without color.
#[must_use]
pub fn failure_message(err: &InvalidMarkupError) -> String {
    format!("{FAILURE_PREFIX}: {err}")
}

/// Report a failed conversion and the parser error behind it.
pub fn failure(err: &InvalidMarkupError) {
    eprintln!("{}", failure_message(err).red());
    eprintln!("  {} {}", "caused by:".dimmed(), err.parse_error());
}

/// Print each parse issue once.
pub fn issues(issues: &[ParseIssue]) {
    for issue in issues {
        warn_once("HTML", &issue.message);
    }
}
