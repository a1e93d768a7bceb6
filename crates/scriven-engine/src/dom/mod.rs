//! In-memory DOM abstraction for the selection core.
//!
//! The selection algorithms only need a small slice of what a real DOM
//! offers: node kind (text/element), ordered children, a parent
//! back-reference, and document-order traversal. Hosts embedding the
//! engine against a real browser tree implement the same shape; tests
//! and headless hosts use this arena directly.
//!
//! Offsets throughout the engine are Unicode scalar counts (`chars()`),
//! measured over the concatenation of all text nodes in document order.

pub mod html;

pub use html::HtmlError;

/// Handle to a node in a [`DomTree`]. Cheap to copy; stable across
/// structural mutation (detaching a node does not invalidate its id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// What a node is: a tagged element with children, or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String },
    Text { text: String },
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed node store. Nodes are created detached and linked with
/// [`DomTree::append_child`] / [`DomTree::insert_before`].
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text {
            text: text.to_string(),
        })
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Tag name for element nodes, `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    /// Text content for text nodes, `None` for elements.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text { text } => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Text { .. })
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Position of `id` among its parent's children.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Replace the content of a text node. No-op on elements.
    pub fn set_text(&mut self, id: NodeId, new_text: &str) {
        if let NodeKind::Text { text } = &mut self.nodes[id.0].kind {
            *text = new_text.to_string();
        }
    }

    /// Detach `child` from its current parent (if any) and append it to
    /// `parent`'s child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detach `child` and insert it into `parent`'s child list before
    /// `reference`. With `reference` absent (or not a child of `parent`)
    /// this appends.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        self.detach(child);
        let at = reference
            .and_then(|r| self.nodes[parent.0].children.iter().position(|&c| c == r))
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[parent.0].children.insert(at, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Unlink `id` from its parent. The node (and its subtree) stays in
    /// the arena and can be re-attached.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// True when `node` is `root` or lies in `root`'s subtree.
    pub fn contains(&self, root: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if n == root {
                return true;
            }
            cursor = self.parent(n);
        }
        false
    }

    /// Total character count of all text nodes in `id`'s subtree
    /// (including `id` itself when it is a text node).
    pub fn text_len(&self, id: NodeId) -> usize {
        match &self.nodes[id.0].kind {
            NodeKind::Text { text } => text.chars().count(),
            NodeKind::Element { .. } => self
                .children(id)
                .iter()
                .map(|&c| self.text_len(c))
                .sum(),
        }
    }

    /// Concatenation of all text nodes in `id`'s subtree, document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text { text } => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Pre-order (document-order) traversal of `root`'s descendants,
    /// excluding `root` itself.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(root).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Nearest block-level element at or above `node`, not walking past
    /// `root`. Returns `root` when no intervening block element exists
    /// (text hanging directly under the editable root).
    pub fn block_ancestor(&self, root: NodeId, node: NodeId) -> NodeId {
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if n == root {
                return root;
            }
            if let Some(tag) = self.tag(n)
                && is_block_tag(tag)
            {
                return n;
            }
            cursor = self.parent(n);
        }
        root
    }
}

/// Iterator over a subtree in document order. See [`DomTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        for &child in self.tree.children(next).iter().rev() {
            self.stack.push(child);
        }
        Some(next)
    }
}

/// Block-level containers for the multi-paragraph selection policy.
pub fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "blockquote"
            | "li"
            | "ul"
            | "ol"
            | "pre"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (DomTree, NodeId) {
        // <div>lorem <i>ipsum</i> dolor</div>
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let t1 = tree.create_text("lorem ");
        let i = tree.create_element("i");
        let t2 = tree.create_text("ipsum");
        let t3 = tree.create_text(" dolor");
        tree.append_child(root, t1);
        tree.append_child(root, i);
        tree.append_child(i, t2);
        tree.append_child(root, t3);
        (tree, root)
    }

    #[test]
    fn text_content_concatenates_in_document_order() {
        let (tree, root) = sample_tree();
        assert_eq!(tree.text_content(root), "lorem ipsum dolor");
        assert_eq!(tree.text_len(root), 17);
    }

    #[test]
    fn descendants_are_pre_order() {
        let (tree, root) = sample_tree();
        let tags: Vec<Option<String>> = tree
            .descendants(root)
            .map(|n| tree.tag(n).map(str::to_string))
            .collect();
        // text, <i>, text (inside i), text
        assert_eq!(tags, vec![None, Some("i".into()), None, None]);
    }

    #[test]
    fn contains_walks_parent_chain() {
        let (mut tree, root) = sample_tree();
        let inner = tree.descendants(root).last().unwrap();
        assert!(tree.contains(root, inner));
        assert!(tree.contains(root, root));

        let detached = tree.create_text("x");
        assert!(!tree.contains(root, detached));
    }

    #[test]
    fn insert_before_and_detach_keep_sibling_order() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        let c = tree.create_text("c");
        tree.append_child(root, a);
        tree.append_child(root, c);
        tree.insert_before(root, b, Some(c));
        assert_eq!(tree.children(root), &[a, b, c]);

        tree.detach(b);
        assert_eq!(tree.children(root), &[a, c]);
        assert_eq!(tree.parent(b), None);

        // re-attach elsewhere
        let wrap = tree.create_element("u");
        tree.append_child(wrap, b);
        assert_eq!(tree.parent(b), Some(wrap));
    }

    #[test]
    fn block_ancestor_stops_at_root() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let p = tree.create_element("p");
        let em = tree.create_element("em");
        let t = tree.create_text("x");
        tree.append_child(root, p);
        tree.append_child(p, em);
        tree.append_child(em, t);

        assert_eq!(tree.block_ancestor(root, t), p);
        assert_eq!(tree.block_ancestor(root, p), p);
        assert_eq!(tree.block_ancestor(root, root), root);

        // inline content directly under the root maps to the root
        let loose = tree.create_text("y");
        tree.append_child(root, loose);
        assert_eq!(tree.block_ancestor(root, loose), root);
    }

    #[test]
    fn text_len_counts_chars_not_bytes() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let t = tree.create_text("héllo…");
        tree.append_child(root, t);
        assert_eq!(tree.text_len(root), 6);
    }
}
