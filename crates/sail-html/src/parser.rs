//! html5ever front end: parse-mode detection, tree import and issue collection.

use std::fmt;
use std::rc::Rc;

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tokenizer::TokenizerOpts;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{QualName, local_name, ns, parse_document, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use sail_dom::{Attribute, DomTree, ElementData, NodeId, NodeType};
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::ParseError;

/// Deepest nesting the importer accepts below the Document node.
pub const MAX_DEPTH: usize = 1024;

/// Prefixes that mark input as a complete document rather than a fragment.
const DOCUMENT_PREFIXES: [&str; 2] = ["<!doctype", "<html"];

/// How the input should be handed to html5ever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ParseMode {
    /// Pick [`ParseMode::Document`] or [`ParseMode::Fragment`] from the input prefix.
    #[default]
    Auto,
    /// Parse without the implicit `html`/`head`/`body` wrapper.
    Fragment,
    /// Parse a complete document; structural elements may be injected.
    Document,
}

impl ParseMode {
    /// Classify input by its prefix.
    ///
    /// Leading whitespace (and a byte order mark) is skipped, then the input is
    /// a document when it starts with `<!doctype` or `<html`, compared
    /// case-insensitively. Anything else is a fragment.
    #[must_use]
    pub fn detect(html: &str) -> Self {
        let trimmed = html.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        let is_document = DOCUMENT_PREFIXES.iter().any(|prefix| {
            trimmed
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });
        if is_document {
            Self::Document
        } else {
            Self::Fragment
        }
    }

    /// Resolve [`ParseMode::Auto`] against `html`; explicit modes are kept.
    #[must_use]
    pub fn resolve(self, html: &str) -> Self {
        match self {
            Self::Auto => Self::detect(html),
            explicit => explicit,
        }
    }
}

/// A parse error html5ever reported and recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// The parser's description of the problem.
    pub message: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// The imported tree. For fragments the Document root holds the top-level
    /// nodes directly.
    pub tree: DomTree,
    /// The mode actually used, never [`ParseMode::Auto`].
    pub mode: ParseMode,
    /// Errors the parser recovered from.
    pub issues: Vec<ParseIssue>,
}

/// Configured entry point to html5ever.
///
/// ```ignore
/// let parsed = HtmlParser::new().with_strict_mode().parse("<p>hi</p>")?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser {
    mode: ParseMode,
    strict_mode: bool,
}

impl HtmlParser {
    /// Create a parser with automatic mode detection and strict mode off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: ParseMode::Auto,
            strict_mode: false,
        }
    }

    /// Force a parse mode instead of detecting it.
    #[must_use]
    pub const fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable strict mode - any reported parse error rejects the input.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Parse `html` and import the result.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] if html5ever's input decoder fails,
    /// [`ParseError::MissingFragmentRoot`] if a fragment parse yields no root
    /// element, and [`ParseError::Strict`] if strict mode is on and the parser
    /// reported any error. Markup nested deeper than [`MAX_DEPTH`] fails with
    /// [`ParseError::TooDeep`].
    pub fn parse(&self, html: &str) -> Result<ParsedDocument, ParseError> {
        let mode = self.mode.resolve(html);
        debug!(%mode, len = html.len(), "parsing markup");

        let (dom, tree) = match mode {
            ParseMode::Fragment => {
                let dom = parse_fragment(
                    RcDom::default(),
                    parse_opts(),
                    QualName::new(None, ns!(html), local_name!("template")),
                    Vec::new(),
                    false,
                )
                .from_utf8()
                .read_from(&mut html.as_bytes())?;
                let tree = import_fragment(&dom)?;
                (dom, tree)
            }
            ParseMode::Document | ParseMode::Auto => {
                let dom = parse_document(RcDom::default(), parse_opts())
                    .from_utf8()
                    .read_from(&mut html.as_bytes())?;
                let mut tree = DomTree::new();
                import_children(&mut tree, NodeId::ROOT, &dom.document)?;
                (dom, tree)
            }
        };

        let issues: Vec<ParseIssue> = dom
            .errors
            .borrow()
            .iter()
            .map(|message| ParseIssue {
                message: message.to_string(),
            })
            .collect();
        debug!(nodes = tree.len(), issues = issues.len(), "imported tree");

        if self.strict_mode && !issues.is_empty() {
            return Err(ParseError::Strict { issues });
        }

        Ok(ParsedDocument { tree, mode, issues })
    }
}

/// Options with detailed error messages from both tokenizer and tree builder.
fn parse_opts() -> ParseOpts {
    ParseOpts {
        tokenizer: TokenizerOpts {
            exact_errors: true,
            ..TokenizerOpts::default()
        },
        tree_builder: TreeBuilderOpts {
            exact_errors: true,
            ..TreeBuilderOpts::default()
        },
    }
}

/// html5ever places fragment nodes under a synthetic `html` element; lift
/// its children to the Document root.
fn import_fragment(dom: &RcDom) -> Result<DomTree, ParseError> {
    let root = dom
        .document
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .ok_or(ParseError::MissingFragmentRoot)?;

    let mut tree = DomTree::new();
    import_children(&mut tree, NodeId::ROOT, &root)?;
    Ok(tree)
}

/// Copy the descendants of `handle` under `parent`.
///
/// Walks with an explicit work stack and fails once nesting exceeds
/// [`MAX_DEPTH`]. Each node's children are appended in one pass, in order.
fn import_children(
    tree: &mut DomTree,
    parent: NodeId,
    handle: &Handle,
) -> Result<(), ParseError> {
    let mut pending: Vec<(NodeId, Handle, usize)> = vec![(parent, Rc::clone(handle), 0)];
    while let Some((parent, handle, depth)) = pending.pop() {
        for child in handle.children.borrow().iter() {
            let node_type = match &child.data {
                // Nested documents do not occur in parser output.
                NodeData::Document => continue,
                NodeData::Doctype { name, .. } => NodeType::Doctype(name.to_string()),
                NodeData::Text { contents } => NodeType::Text(contents.borrow().to_string()),
                NodeData::Comment { contents } => NodeType::Comment(contents.to_string()),
                NodeData::ProcessingInstruction { contents, .. } => {
                    NodeType::Comment(contents.to_string())
                }
                NodeData::Element { name, attrs, .. } => NodeType::Element(ElementData {
                    tag_name: name.local.to_string(),
                    attrs: attrs
                        .borrow()
                        .iter()
                        .map(|attr| {
                            Attribute::new(qualified_name(&attr.name), attr.value.to_string())
                        })
                        .collect(),
                }),
            };
            if depth >= MAX_DEPTH {
                return Err(ParseError::TooDeep { limit: MAX_DEPTH });
            }
            let id = tree.append_new(parent, node_type);
            pending.push((id, Rc::clone(child), depth + 1));
        }
    }
    Ok(())
}

/// `prefix:local` for namespaced attributes such as `xlink:href`.
fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_fragments() {
        assert_eq!(ParseMode::detect("<div></div>"), ParseMode::Fragment);
        assert_eq!(ParseMode::detect("hello"), ParseMode::Fragment);
        assert_eq!(ParseMode::detect(""), ParseMode::Fragment);
        assert_eq!(ParseMode::detect("<ht"), ParseMode::Fragment);
    }

    #[test]
    fn detects_documents_case_insensitively() {
        assert_eq!(ParseMode::detect("<!DOCTYPE html>"), ParseMode::Document);
        assert_eq!(ParseMode::detect("  \n\t<!doctype html>"), ParseMode::Document);
        assert_eq!(ParseMode::detect("<HTML lang=en>"), ParseMode::Document);
        assert_eq!(ParseMode::detect("\u{feff}<html>"), ParseMode::Document);
    }

    #[test]
    fn explicit_mode_is_kept() {
        assert_eq!(ParseMode::Fragment.resolve("<html>"), ParseMode::Fragment);
        assert_eq!(ParseMode::Document.resolve("<p>"), ParseMode::Document);
        assert_eq!(ParseMode::Auto.resolve("<p>"), ParseMode::Fragment);
    }

    #[test]
    fn mode_round_trips_through_strings() {
        assert_eq!("fragment".parse::<ParseMode>().ok(), Some(ParseMode::Fragment));
        assert_eq!(ParseMode::Document.to_string(), "document");
        assert!("xml".parse::<ParseMode>().is_err());
    }
}
