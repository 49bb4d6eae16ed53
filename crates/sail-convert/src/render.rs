//! Tree-to-Sail renderer.
//!
//! Every element renders to one of three shapes:
//! - a self-terminated line: `;br;`
//! - a line with inline text: `;p: hello`
//! - a block closed by `==` at the header's indentation, children 2 deeper
//!
//! Text renders as `; text`. Whitespace-only text, comments and doctypes
//! render to nothing, and empty renderings never produce blank lines.

use std::borrow::Cow;

use sail_dom::{Attribute, DomTree, ElementData, NodeId, NodeType};

/// Spaces added per nesting level.
pub const INDENT_STEP: usize = 2;

/// Tags that always render as a single self-terminated line, children or not.
pub const SELF_CLOSING_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Walks a [`DomTree`] and produces Sail text.
///
/// The renderer only reads the tree; attributes folded into a shorthand are
/// skipped by position when the generic attribute list is written.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    tree: &'a DomTree,
}

impl<'a> Renderer<'a> {
    /// Create a renderer over `tree`.
    #[must_use]
    pub const fn new(tree: &'a DomTree) -> Self {
        Self { tree }
    }

    /// Render the Document root as a whole document.
    #[must_use]
    pub fn render_document(&self) -> String {
        self.render_node(self.tree.root(), 0).trim().to_string()
    }

    /// Render each top-level node of a fragment at indentation 0.
    #[must_use]
    pub fn render_fragment(&self) -> String {
        self.join_children(self.tree.root(), 0).trim().to_string()
    }

    /// Render one node at `level` spaces of indentation.
    ///
    /// Returns an empty string for nodes that have no Sail representation.
    #[must_use]
    pub fn render_node(&self, id: NodeId, level: usize) -> String {
        let Some(node) = self.tree.get(id) else {
            return String::new();
        };
        match &node.node_type {
            NodeType::Document => self.join_children(id, level),
            NodeType::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    String::new()
                } else {
                    format!("{}; {text}", indent(level))
                }
            }
            NodeType::Element(data) => self.render_element(id, data, level),
            NodeType::Comment(_) | NodeType::Doctype(_) => String::new(),
        }
    }

    /// Render an element and its subtree.
    #[must_use]
    pub fn render_element(&self, id: NodeId, data: &ElementData, level: usize) -> String {
        if data.tag_name == "!doctype" {
            return String::new();
        }

        let mut result = tag_line(data, level);

        let children = self.tree.children(id);
        if is_self_closing(&data.tag_name) || children.is_empty() {
            result.push(';');
            return result;
        }

        if let [only] = children
            && let Some(text) = self.tree.as_text(*only)
        {
            let text = text.trim();
            if !text.is_empty() {
                result.push_str(": ");
                result.push_str(text);
                return result;
            }
        }

        result.push('\n');
        for &child in children {
            let rendered = self.render_node(child, level + INDENT_STEP);
            if !rendered.is_empty() {
                result.push_str(&rendered);
                result.push('\n');
            }
        }
        result.push_str(&indent(level));
        result.push_str("==");
        result
    }

    /// Render the children of `id` at `level`, one per line, skipping empties.
    fn join_children(&self, id: NodeId, level: usize) -> String {
        self.tree
            .children(id)
            .iter()
            .map(|&child| self.render_node(child, level))
            .filter(|rendered| !rendered.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Whether `tag` is one of [`SELF_CLOSING_TAGS`].
#[must_use]
pub fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&tag)
}

/// `level` spaces.
#[must_use]
pub fn indent(level: usize) -> String {
    " ".repeat(level)
}

/// The header line of an element: indentation, `;tag`, shorthands, then the
/// generic attribute list.
fn tag_line(data: &ElementData, level: usize) -> String {
    let mut line = format!("{};{}", indent(level), data.tag_name);
    let mut consumed = Vec::new();

    if let Some((pos, id)) = shorthand(data, "id") {
        line.push('#');
        line.push_str(id);
        consumed.push(pos);
    }

    if data.tag_name == "img"
        && let Some((pos, src)) = shorthand(data, "src")
    {
        line.push_str(&format!("@\"{}\"", escape_quoted(src)));
        consumed.push(pos);
    }

    if data.tag_name == "a"
        && let Some((pos, href)) = shorthand(data, "href")
    {
        line.push_str(&format!("/\"{}\"", escape_quoted(href)));
        consumed.push(pos);
    }

    let generic: Vec<String> = generic_attributes(&data.attrs, &consumed)
        .map(|attr| format!("{} \"{}\"", attr.name, escape_quoted(&attr.value)))
        .collect();
    if !generic.is_empty() {
        line.push('(');
        line.push_str(&generic.join(", "));
        line.push(')');
    }

    line
}

/// Position and value of the first `name` attribute, when its value is
/// non-empty. Empty values never produce a shorthand.
fn shorthand<'d>(data: &'d ElementData, name: &str) -> Option<(usize, &'d str)> {
    let pos = data.attribute_position(name)?;
    let value = data.attrs[pos].value.as_str();
    (!value.is_empty()).then_some((pos, value))
}

/// Attributes left for the parenthesized list: everything not consumed by a
/// shorthand, and never `id`.
pub fn generic_attributes<'d>(
    attrs: &'d [Attribute],
    consumed: &'d [usize],
) -> impl Iterator<Item = &'d Attribute> + 'd {
    attrs
        .iter()
        .enumerate()
        .filter(move |(pos, attr)| !consumed.contains(pos) && attr.name != "id")
        .map(|(_, attr)| attr)
}

/// Escape a value for a `"…"` position: `\` becomes `\\` and `"` becomes `\"`.
#[must_use]
pub fn escape_quoted(value: &str) -> Cow<'_, str> {
    if !value.contains(['"', '\\']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
