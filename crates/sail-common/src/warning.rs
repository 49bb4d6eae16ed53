//! Converter warnings with colored terminal output.
//!
//! Provides deduplication so a document full of the same parse error reports
//! it once. Used by the CLI to surface issues the HTML parser recovered from.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Build the deduplication key for a warning.
fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Record `key` as reported. Returns `true` the first time a key is seen.
fn first_report(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML", "Unexpected token");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_report(warning_key(component, message)) {
        eprintln!("{}", format!("[Sail {component}] ⚠ {message}").yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_includes_component() {
        assert_eq!(warning_key("HTML", "oops"), "[HTML] oops");
    }

    #[test]
    fn repeated_warnings_report_once() {
        let key = warning_key("test", "repeated_warnings_report_once");
        assert!(first_report(key.clone()));
        assert!(!first_report(key));
    }
}
