//! Integration tests for the html5ever front end.

use sail_dom::{Attribute, DomTree, NodeId, NodeType};
use sail_html::{HtmlParser, MAX_DEPTH, ParseError, ParseMode, ParsedDocument, format_tree};

/// Helper to parse HTML with default options
fn parse(html: &str) -> ParsedDocument {
    HtmlParser::new().parse(html).expect("parse succeeds")
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

/// Helper to list the tag names of the element children of a node
fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .filter_map(|&child| tree.as_element(child))
        .map(|data| data.tag_name.clone())
        .collect()
}

#[test]
fn test_fragment_has_no_wrapper() {
    let parsed = parse("<div><p>one</p></div>");
    assert_eq!(parsed.mode, ParseMode::Fragment);
    assert_eq!(child_tags(&parsed.tree, NodeId::ROOT), vec!["div"]);
    assert!(find_element(&parsed.tree, NodeId::ROOT, "body").is_none());
}

#[test]
fn test_fragment_keeps_top_level_text_and_siblings() {
    let parsed = parse("hello <b>bold</b> tail");
    let children = parsed.tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 3);
    assert_eq!(parsed.tree.as_text(children[0]), Some("hello "));
    assert_eq!(
        parsed.tree.as_element(children[1]).map(|e| e.tag_name.as_str()),
        Some("b")
    );
    assert_eq!(parsed.tree.as_text(children[2]), Some(" tail"));
}

#[test]
fn test_document_structure_is_injected() {
    let parsed = parse("<html><p>x</p></html>");
    assert_eq!(parsed.mode, ParseMode::Document);

    let html = find_element(&parsed.tree, NodeId::ROOT, "html").expect("html element");
    assert_eq!(child_tags(&parsed.tree, html), vec!["head", "body"]);
    let body = find_element(&parsed.tree, html, "body").expect("body element");
    assert_eq!(child_tags(&parsed.tree, body), vec!["p"]);
}

#[test]
fn test_doctype_is_imported() {
    let parsed = parse("<!DOCTYPE html><html><body></body></html>");
    let first = parsed.tree.children(NodeId::ROOT)[0];
    assert!(matches!(
        parsed.tree.get(first).map(|n| &n.node_type),
        Some(NodeType::Doctype(name)) if name == "html"
    ));
}

#[test]
fn test_comment_node() {
    let parsed = parse("<div><!-- test comment --></div>");
    let div = find_element(&parsed.tree, NodeId::ROOT, "div").expect("div element");
    let has_comment = parsed.tree.children(div).iter().any(|&child_id| {
        matches!(
            parsed.tree.get(child_id).map(|n| &n.node_type),
            Some(NodeType::Comment(data)) if data == " test comment "
        )
    });
    assert!(has_comment);
}

#[test]
fn test_attribute_order_is_preserved() {
    let parsed = parse(r#"<input type="text" name="q" id="search" disabled>"#);
    let input = find_element(&parsed.tree, NodeId::ROOT, "input").expect("input element");
    let data = parsed.tree.as_element(input).expect("element data");
    assert_eq!(
        data.attrs,
        vec![
            Attribute::new("type", "text"),
            Attribute::new("name", "q"),
            Attribute::new("id", "search"),
            Attribute::new("disabled", ""),
        ]
    );
}

#[test]
fn test_tag_names_are_lowercased() {
    let parsed = parse("<DIV CLASS=a>x</DIV>");
    let div = find_element(&parsed.tree, NodeId::ROOT, "div").expect("div element");
    assert_eq!(
        parsed.tree.as_element(div).and_then(|d| d.get_attribute("class")),
        Some("a")
    );
}

#[test]
fn test_namespaced_attribute_keeps_prefix() {
    let parsed = parse(r##"<svg><use xlink:href="#icon"></use></svg>"##);
    let use_el = find_element(&parsed.tree, NodeId::ROOT, "use").expect("use element");
    assert_eq!(
        parsed.tree.as_element(use_el).and_then(|d| d.get_attribute("xlink:href")),
        Some("#icon")
    );
}

#[test]
fn test_forced_fragment_mode_skips_wrapper() {
    let parsed = HtmlParser::new()
        .with_mode(ParseMode::Fragment)
        .parse("<html><p>x</p></html>")
        .expect("parse succeeds");
    assert_eq!(parsed.mode, ParseMode::Fragment);
    assert!(find_element(&parsed.tree, NodeId::ROOT, "body").is_none());
    assert!(find_element(&parsed.tree, NodeId::ROOT, "p").is_some());
}

#[test]
fn test_forced_document_mode_wraps_fragment() {
    let parsed = HtmlParser::new()
        .with_mode(ParseMode::Document)
        .parse("<p>x</p>")
        .expect("parse succeeds");
    assert_eq!(parsed.mode, ParseMode::Document);
    assert!(find_element(&parsed.tree, NodeId::ROOT, "body").is_some());
}

#[test]
fn test_recovered_errors_are_reported_as_issues() {
    let parsed = parse("<div></span></div>");
    assert!(!parsed.issues.is_empty());
    assert!(find_element(&parsed.tree, NodeId::ROOT, "div").is_some());
}

#[test]
fn test_strict_mode_rejects_recovered_errors() {
    let result = HtmlParser::new()
        .with_strict_mode()
        .parse("<div></span></div>");
    match result {
        Err(ParseError::Strict { issues }) => assert!(!issues.is_empty()),
        other => panic!("expected strict rejection, got {other:?}"),
    }
}

#[test]
fn test_depth_limit_counts_every_level() {
    // The text node sits one level below the innermost div.
    let at_limit = format!("{}x", "<div>".repeat(MAX_DEPTH - 1));
    let parsed = parse(&at_limit);
    assert_eq!(parsed.tree.len(), MAX_DEPTH + 1);

    let over_limit = format!("{}x", "<div>".repeat(MAX_DEPTH));
    match HtmlParser::new().parse(&over_limit) {
        Err(ParseError::TooDeep { limit }) => assert_eq!(limit, MAX_DEPTH),
        other => panic!("expected depth rejection, got {other:?}"),
    }
}

#[test]
fn test_deep_document_is_rejected_not_overflowed() {
    let html = format!("<!DOCTYPE html><body>{}x", "<div>".repeat(MAX_DEPTH * 4));
    assert!(matches!(
        HtmlParser::new().parse(&html),
        Err(ParseError::TooDeep { .. })
    ));
}

#[test]
fn test_strict_mode_accepts_clean_fragment() {
    let parsed = HtmlParser::new()
        .with_strict_mode()
        .parse(r#"<div id="x"><p>one</p></div>"#)
        .expect("clean markup parses");
    assert!(parsed.issues.is_empty());
}

#[test]
fn test_format_tree_dump() {
    let parsed = parse(r#"<p class="c">a b</p><!--n-->"#);
    assert_eq!(
        format_tree(&parsed.tree, NodeId::ROOT),
        "Document\n  <p class=\"c\">\n    \"a\u{00B7}b\"\n  <!-- n -->\n"
    );
}
