//! Serde view over a subtree, used for JSON dumps of the parsed tree.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::{DomTree, NodeId, NodeType};

/// Borrowed view of one node and its descendants that serializes as a nested
/// map: `type`, then variant fields, then `children` when non-empty.
#[derive(Clone, Copy)]
pub struct SerializableNode<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> SerializableNode<'a> {
    /// Create a view of `id` within `tree`.
    #[must_use]
    pub const fn new(tree: &'a DomTree, id: NodeId) -> Self {
        Self { tree, id }
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(node) = self.tree.get(self.id) {
            match &node.node_type {
                NodeType::Document => map.serialize_entry("type", "document")?,
                NodeType::Element(data) => {
                    map.serialize_entry("type", "element")?;
                    map.serialize_entry("tagName", &data.tag_name)?;
                    map.serialize_entry("attributes", &data.attrs)?;
                }
                NodeType::Text(text) => {
                    map.serialize_entry("type", "text")?;
                    map.serialize_entry("content", text)?;
                }
                NodeType::Comment(text) => {
                    map.serialize_entry("type", "comment")?;
                    map.serialize_entry("content", text)?;
                }
                NodeType::Doctype(name) => {
                    map.serialize_entry("type", "doctype")?;
                    map.serialize_entry("name", name)?;
                }
            }

            if !node.children.is_empty() {
                let children: Vec<SerializableNode<'_>> = node
                    .children
                    .iter()
                    .map(|&child| Self::new(self.tree, child))
                    .collect();
                map.serialize_entry("children", &children)?;
            }
        }
        map.end()
    }
}
