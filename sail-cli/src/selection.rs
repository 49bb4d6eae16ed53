//! Line-range selections: which part of the input gets converted and replaced.

use std::ops::Range;
use std::str::FromStr;

use anyhow::{Result, bail};

/// A 1-based, inclusive range of lines, written `START:END` or `LINE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once(':').unwrap_or((s, s));
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid line number '{part}': {e}"))
        };
        let (start, end) = (parse(start)?, parse(end)?);
        if start == 0 {
            return Err("line numbers start at 1".to_string());
        }
        if end < start {
            return Err(format!("range end {end} is before start {start}"));
        }
        Ok(Self { start, end })
    }
}

impl LineRange {
    /// Byte range in `text` covering the selected lines.
    ///
    /// The terminator of the last selected line is not part of the range, so
    /// replacing the range keeps the following line on its own line.
    pub fn byte_range(self, text: &str) -> Result<Range<usize>> {
        let spans = line_spans(text);
        if self.end > spans.len() {
            bail!(
                "line range {}:{} is outside the input ({} lines)",
                self.start,
                self.end,
                spans.len()
            );
        }
        Ok(spans[self.start - 1].start..spans[self.end - 1].end)
    }
}

/// Byte spans of every line's content, without `\n` or `\r\n` terminators.
fn line_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        let content = content.strip_suffix('\r').unwrap_or(content);
        spans.push(offset..offset + content.len());
        offset += line.len();
    }
    spans
}

/// `text` with `range` swapped for `replacement`.
#[must_use]
pub fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - range.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "first\r\n<p>a</p>\n<br>\nlast";

    #[test]
    fn parses_ranges_and_single_lines() {
        assert_eq!("2:3".parse::<LineRange>(), Ok(LineRange { start: 2, end: 3 }));
        assert_eq!("4".parse::<LineRange>(), Ok(LineRange { start: 4, end: 4 }));
        assert!("0:2".parse::<LineRange>().is_err());
        assert!("3:2".parse::<LineRange>().is_err());
        assert!("a:b".parse::<LineRange>().is_err());
    }

    #[test]
    fn byte_range_excludes_final_terminator() {
        let range = LineRange { start: 2, end: 3 }.byte_range(TEXT).expect("in range");
        assert_eq!(&TEXT[range], "<p>a</p>\n<br>");
    }

    #[test]
    fn crlf_terminators_are_not_selected() {
        let range = LineRange { start: 1, end: 1 }.byte_range(TEXT).expect("in range");
        assert_eq!(&TEXT[range], "first");
    }

    #[test]
    fn out_of_range_is_an_error() {
        assert!(LineRange { start: 4, end: 5 }.byte_range(TEXT).is_err());
        assert!(LineRange { start: 1, end: 1 }.byte_range("").is_err());
    }

    #[test]
    fn splice_replaces_only_the_selection() {
        let range = LineRange { start: 2, end: 3 }.byte_range(TEXT).expect("in range");
        assert_eq!(
            splice(TEXT, range, ";p: a\n;br;"),
            "first\r\n;p: a\n;br;\nlast"
        );
    }
}
