//! Node tree implementation for the Sail converter.
//!
//! This crate provides an arena-based tree holding the parsed markup that the
//! renderer walks. It models only what conversion needs: documents, elements
//! with ordered attributes, text, and opaque nodes (comments, doctypes).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.

mod json;

pub use json::SerializableNode;

use serde::Serialize;

/// A type-safe index into the node tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the tree.
///
/// Stores the parent and the ordered child list by index.
#[derive(Debug, Clone)]
pub struct Node {
    /// The variant of this node and its payload.
    pub node_type: NodeType,

    /// The parent node, `None` for the document root and detached nodes.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// The closed set of node variants the converter distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The document root. For fragment input it holds the top-level nodes.
    Document,
    /// An element with a tag name and ordered attributes.
    Element(ElementData),
    /// Raw character data, untrimmed.
    Text(String),
    /// A comment. Carried for debugging output only.
    Comment(String),
    /// A `<!DOCTYPE>` declaration, holding the doctype name.
    Doctype(String),
}

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute name, including a namespace prefix when one was written.
    pub name: String,
    /// Attribute value. Valueless attributes hold the empty string.
    pub value: String,
}

impl Attribute {
    /// Create an attribute from a name and a value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Element-specific data.
///
/// Attributes keep the order in which the parser encountered them, and
/// duplicate names are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    /// The element's local name, lowercase for HTML elements.
    pub tag_name: String,
    /// The element's attributes in source order.
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// Create element data with a tag name and no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: Vec::new(),
        }
    }

    /// Builder-style helper appending an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute::new(name, value));
        self
    }

    /// Index of the first attribute called `name`.
    #[must_use]
    pub fn attribute_position(&self, name: &str) -> Option<usize> {
        self.attrs.iter().position(|attr| attr.name == name)
    }

    /// Value of the first attribute called `name`, if any.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Remove the first attribute called `name` and return it.
    ///
    /// Does nothing when no such attribute exists.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let index = self.attribute_position(name)?;
        Some(self.attrs.remove(index))
    }
}

/// Arena-based node tree with O(1) node access.
///
/// All nodes live in a contiguous vector and refer to each other by index.
/// The Document node is always at index 0 ([`NodeId::ROOT`]).
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, the Document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either ID was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate a node and append it to `parent` in one step.
    pub fn append_new(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        let id = self.alloc(node_type);
        self.append_child(parent, id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// A serde view of the subtree rooted at `id`.
    #[must_use]
    pub const fn serializable(&self, id: NodeId) -> SerializableNode<'_> {
        SerializableNode::new(self, id)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
