//! Indented debugging dump of a parsed tree.

use sail_dom::{DomTree, NodeId, NodeType};

/// Render the subtree at `id` as an indented debugging dump, one node per line.
///
/// Spaces and newlines inside text nodes are made visible so whitespace-only
/// nodes can be told apart.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

/// Print the subtree at `id` to stdout, see [`format_tree`].
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", format_tree(tree, id));
}

fn write_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    out.push_str(&"  ".repeat(depth));
    match &node.node_type {
        NodeType::Document => out.push_str("Document"),
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                out.push_str(&format!("<{}>", data.tag_name));
            } else {
                let attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|attr| {
                        if attr.value.is_empty() {
                            attr.name.clone()
                        } else {
                            format!("{}=\"{}\"", attr.name, attr.value)
                        }
                    })
                    .collect();
                out.push_str(&format!("<{} {}>", data.tag_name, attrs.join(" ")));
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            out.push_str(&format!("\"{display}\""));
        }
        NodeType::Comment(data) => out.push_str(&format!("<!-- {data} -->")),
        NodeType::Doctype(name) => out.push_str(&format!("<!DOCTYPE {name}>")),
    }
    out.push('\n');
    for &child_id in tree.children(id) {
        write_node(tree, child_id, depth + 1, out);
    }
}
