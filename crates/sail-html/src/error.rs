use std::io;

use thiserror::Error;

use crate::parser::ParseIssue;

/// Reasons the front end could not produce a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The decoder feeding html5ever failed while reading the input.
    #[error("failed to read markup input")]
    Io(#[from] io::Error),

    /// Fragment parsing finished without the synthetic root element that
    /// holds the top-level nodes.
    #[error("fragment parse produced no root element")]
    MissingFragmentRoot,

    /// The markup nests deeper than the importer accepts.
    #[error("markup nests deeper than {limit} levels")]
    TooDeep {
        /// The maximum accepted depth.
        limit: usize,
    },

    /// Strict mode is on and the parser reported errors it recovered from.
    #[error(
        "{} parse error(s) in strict mode, first: {}",
        .issues.len(),
        first_message(.issues)
    )]
    Strict {
        /// Every issue the parser reported, in order.
        issues: Vec<ParseIssue>,
    },
}

fn first_message(issues: &[ParseIssue]) -> &str {
    issues.first().map_or("", |issue| issue.message.as_str())
}
