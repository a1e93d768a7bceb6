//! Minimal HTML fragment support.
//!
//! Covers the well-formed subset that headless hosts and the test
//! suites need: bare open/close tags, text runs, character entities.
//! Attributes are parsed past and discarded; void elements, comments
//! and doctype handling are out of scope.

use thiserror::Error;

use super::{DomTree, NodeId, NodeKind};

#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("closing tag </{0}> does not match any open element")]
    UnexpectedClose(String),
    #[error("unclosed element <{0}> at end of fragment")]
    UnclosedTag(String),
    #[error("malformed tag near offset {0}")]
    MalformedTag(usize),
}

/// Parse `fragment` and append the resulting nodes as children of
/// `parent`, in order.
pub fn append_fragment(tree: &mut DomTree, parent: NodeId, fragment: &str) -> Result<(), HtmlError> {
    let mut open: Vec<NodeId> = vec![parent];
    let bytes = fragment.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'<' {
            let close = fragment[pos..]
                .find('>')
                .map(|i| pos + i)
                .ok_or(HtmlError::MalformedTag(pos))?;
            let inner = &fragment[pos + 1..close];
            if let Some(name) = inner.strip_prefix('/') {
                let name = name.trim().to_ascii_lowercase();
                let top = *open.last().expect("parent always on stack");
                if open.len() == 1 || tree.tag(top) != Some(name.as_str()) {
                    return Err(HtmlError::UnexpectedClose(name));
                }
                open.pop();
            } else {
                let name = inner
                    .split_whitespace()
                    .next()
                    .ok_or(HtmlError::MalformedTag(pos))?
                    .to_ascii_lowercase();
                let el = tree.create_element(&name);
                let top = *open.last().expect("parent always on stack");
                tree.append_child(top, el);
                open.push(el);
            }
            pos = close + 1;
        } else {
            let end = fragment[pos..]
                .find('<')
                .map(|i| pos + i)
                .unwrap_or(fragment.len());
            let decoded = html_escape::decode_html_entities(&fragment[pos..end]);
            let text = tree.create_text(&decoded);
            let top = *open.last().expect("parent always on stack");
            tree.append_child(top, text);
            pos = end;
        }
    }

    if open.len() > 1 {
        let top = *open.last().expect("checked non-empty");
        return Err(HtmlError::UnclosedTag(
            tree.tag(top).unwrap_or_default().to_string(),
        ));
    }
    Ok(())
}

/// Serialize the children of `node` (its "innerHTML"). Text is
/// re-escaped; elements render as `<tag>…</tag>`.
pub fn serialize(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(node) {
        serialize_node(tree, child, &mut out);
    }
    out
}

fn serialize_node(tree: &DomTree, node: NodeId, out: &mut String) {
    match tree.kind(node) {
        NodeKind::Text { text } => out.push_str(&html_escape::encode_text(text)),
        NodeKind::Element { tag } => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            for &child in tree.children(node) {
                serialize_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
