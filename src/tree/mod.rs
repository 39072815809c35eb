//! Arena-based markup tree.
//!
//! All nodes live in a contiguous `Vec<NodeData>` owned by the `Document`,
//! and are referenced by `NodeId`, a newtype over `NonZeroU32`. A document
//! may hold any number of independent trees; each tree is identified by its
//! root node.
//!
//! # Architecture
//!
//! Parent, root and sibling links are arena indices rather than references,
//! so the back-references a tree needs for navigation never form ownership
//! cycles. A node's children are the linked list starting at `first_child`;
//! that list is the rendering order. Removing a node unlinks it (and with it
//! the subtree below it) from its parent; the slots stay allocated but are
//! no longer reachable from the tree.

mod attr;
mod builder;
mod node;

pub use attr::{AttrValue, Attributes};
pub use builder::NodeBuilder;
pub use node::NodeKind;

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::MarkupError;
use crate::escape::EscapeOptions;
use crate::html::{HtmlVoidElements, VoidElements};
use crate::util::name::validate_name;

/// A typed index into the document's node arena.
///
/// `NodeId` is a newtype over `NonZeroU32`, so `Option<NodeId>` has the
/// same size as `NodeId`. Comparing two ids compares node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` for arena slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if the arena has grown past `u32::MAX - 1` slots.
    #[allow(clippy::expect_used)]
    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index)
            .ok()
            .and_then(|i| NonZeroU32::MIN.checked_add(i));
        Self(raw.expect("node arena exceeds u32::MAX entries"))
    }

    /// Returns the arena slot for this id.
    fn as_index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Converts this `NodeId` to a raw, always non-zero `u32`.
    #[must_use]
    pub fn into_raw(self) -> u32 {
        self.0.get()
    }

    /// Creates a `NodeId` from a raw `u32`, if non-zero.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }
}

/// Storage for a single node in the document arena.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Element or text carrier, with its payload.
    pub kind: NodeKind,
    /// Attributes, in insertion order. Only rendered for elements.
    pub attributes: Attributes,
    /// Parent node, if any. Roots and detached nodes have none.
    pub parent: Option<NodeId>,
    /// The top of the tree this node belongs to; the node itself for roots.
    pub root: NodeId,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node (for O(1) append).
    pub last_child: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind, root: NodeId) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            parent: None,
            root,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// A node arena holding one or more markup trees.
///
/// Nodes are never freed individually. [`remove`](Self::remove) releases a
/// subtree from its tree, but its slots stay in the arena until the
/// document is dropped, so a long loop of appends and removes grows the
/// arena. Build short-lived documents for that pattern.
///
/// The document also carries the configuration its trees are built with:
/// the void-element lookup, asked once per element creation, and the
/// [`EscapeOptions`] applied to text when it is attached.
///
/// # Examples
///
/// ```
/// use markupgen::{Convention, Document, EscapeOptions};
/// use markupgen::serial::serialize_with_options;
///
/// let mut doc = Document::new();
/// let div = doc.create_element("div");
/// doc.set_attribute(div, "class", ["a", "b"]);
/// let img = doc.append_element(div, "img");
/// doc.set_attribute(img, "src", "x.png");
/// doc.append_text(div, "Hi");
///
/// let opts = EscapeOptions::default().convention(Convention::Html);
/// assert_eq!(
///     serialize_with_options(&doc, img, &opts),
///     r#"<div class="a b"><img src="x.png"/>Hi</div>"#
/// );
/// ```
#[derive(Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    void_elements: Arc<dyn VoidElements + Send + Sync>,
    escape: EscapeOptions,
}

impl Document {
    /// Creates an empty document using the HTML void-element list and
    /// default escape options (escaping off, `Xml1` convention).
    #[must_use]
    pub fn new() -> Self {
        Self::with_void_elements(HtmlVoidElements)
    }

    /// Creates an empty document with a custom void-element lookup.
    ///
    /// ```
    /// use markupgen::Document;
    /// use markupgen::html::NoVoidElements;
    ///
    /// let mut doc = Document::with_void_elements(NoVoidElements);
    /// let br = doc.create_element("br");
    /// assert!(!doc.is_void(br));
    /// ```
    pub fn with_void_elements(void_elements: impl VoidElements + Send + Sync + 'static) -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            void_elements: Arc::new(void_elements),
            escape: EscapeOptions::default(),
        }
    }

    /// Replaces the escape options, returning the document.
    #[must_use]
    pub fn with_escape_options(mut self, options: EscapeOptions) -> Self {
        self.escape = options;
        self
    }

    /// Returns the escape options currently applied to attached text.
    #[must_use]
    pub fn escape_options(&self) -> EscapeOptions {
        self.escape
    }

    /// Replaces the escape options.
    ///
    /// Text already attached keeps the form it was attached in; attributes
    /// are escaped at render time and pick up the new options on the next
    /// render.
    pub fn set_escape_options(&mut self, options: EscapeOptions) {
        self.escape = options;
    }

    /// Returns a reference to the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    /// Returns the tag name of an element, or `None` for text nodes.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text { .. } => None,
        }
    }

    /// Returns the content of a text node, or `None` for elements.
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text { content } => Some(content),
            NodeKind::Element { .. } => None,
        }
    }

    /// Returns `true` if the node is a void element.
    #[must_use]
    pub fn is_void(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { void: true, .. })
    }

    /// Returns `true` if the node has a tag.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    /// Returns the total number of nodes allocated in the arena, including
    /// removed ones.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Creation ---

    /// Allocates a new detached node and returns its `NodeId`.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData::new(kind, id));
        id
    }

    /// Creates a new root node for `tag`.
    ///
    /// An empty tag creates a fragment: a tagless node that renders only its
    /// children.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let kind = NodeKind::from_tag(tag, |t| self.void_elements.is_void(t));
        self.create_node(kind)
    }

    /// Appends a new child element `tag` to `parent` and returns the child.
    ///
    /// The returned id is the new focus of a building chain; see
    /// [`NodeBuilder`] for a cursor that tracks it.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.attach(parent, child);
        child
    }

    /// Like [`append_element`](Self::append_element), but rejects tag names
    /// that are not valid markup names.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidName`](crate::error::ErrorKind::InvalidName)
    /// if `tag` is empty or malformed. Nothing is appended in that case.
    pub fn try_append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
    ) -> Result<NodeId, MarkupError> {
        let tag = validate_name(tag)?;
        Ok(self.append_element(parent, tag))
    }

    /// Appends a deep copy of `source` to `parent` and returns the copy.
    ///
    /// The copy has fresh ids throughout, so attaching never aliases a node
    /// that is already part of a tree. `source` may be an ancestor of
    /// `parent`; the subtree is copied before it is attached.
    pub fn append_copy(&mut self, parent: NodeId, source: NodeId) -> NodeId {
        let copy = self.copy_subtree(source);
        self.attach(parent, copy);
        copy
    }

    /// Appends a deep copy of `source`, a node of `other`, to `parent`.
    ///
    /// Void flags are copied as they are in `other`.
    pub fn import_node(&mut self, parent: NodeId, other: &Document, source: NodeId) -> NodeId {
        let copy = self.import_subtree(other, source);
        self.attach(parent, copy);
        copy
    }

    fn copy_subtree(&mut self, source: NodeId) -> NodeId {
        let top = self.copy_node(source);
        // (original, parent copy) pairs; siblings are pushed in reverse so
        // each parent receives its children in order.
        let mut stack: Vec<(NodeId, NodeId)> =
            self.children(source).map(|c| (c, top)).collect();
        stack.reverse();
        while let Some((original, parent)) = stack.pop() {
            let copy = self.copy_node(original);
            self.link(parent, copy);
            let first = stack.len();
            stack.extend(self.children(original).map(|c| (c, copy)));
            stack[first..].reverse();
        }
        top
    }

    fn copy_node(&mut self, source: NodeId) -> NodeId {
        let data = self.node(source);
        let kind = data.kind.clone();
        let attributes = data.attributes.clone();
        let copy = self.create_node(kind);
        self.node_mut(copy).attributes = attributes;
        copy
    }

    fn import_subtree(&mut self, other: &Document, source: NodeId) -> NodeId {
        let top = self.import_one(other, source);
        let mut stack: Vec<(NodeId, NodeId)> =
            other.children(source).map(|c| (c, top)).collect();
        stack.reverse();
        while let Some((original, parent)) = stack.pop() {
            let copy = self.import_one(other, original);
            self.link(parent, copy);
            let first = stack.len();
            stack.extend(other.children(original).map(|c| (c, copy)));
            stack[first..].reverse();
        }
        top
    }

    fn import_one(&mut self, other: &Document, source: NodeId) -> NodeId {
        let data = other.node(source);
        let copy = self.create_node(data.kind.clone());
        self.node_mut(copy).attributes = data.attributes.clone();
        copy
    }

    // --- Attributes ---

    /// Returns the attributes of a node.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &Attributes {
        &self.node(id).attributes
    }

    /// Returns the attributes of a node for in-place editing.
    pub fn attributes_mut(&mut self, id: NodeId) -> &mut Attributes {
        &mut self.node_mut(id).attributes
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&AttrValue> {
        self.attributes(id).get(key)
    }

    /// Returns `true` if the attribute is set.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, key: &str) -> bool {
        self.attributes(id).has(key)
    }

    /// Sets one attribute and returns `id`. A `Null` value removes it.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> NodeId {
        self.attributes_mut(id).set(key, value);
        id
    }

    /// Sets every attribute in `attrs`, in order, and returns `id`.
    pub fn set_attributes<I, K, V>(&mut self, id: NodeId, attrs: I) -> NodeId
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        self.attributes_mut(id).extend(attrs);
        id
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: NodeId, key: &str) -> Option<AttrValue> {
        self.attributes_mut(id).remove(key)
    }

    // --- Text ---

    /// Attaches a text leaf under `id` and returns `id`.
    ///
    /// The text is escaped now, with the document's current escape options,
    /// if escaping is enabled. Text does not shift the focus of a building
    /// chain.
    pub fn append_text(&mut self, id: NodeId, text: &str) -> NodeId {
        let content = self.escape.apply(text);
        let leaf = self.create_node(NodeKind::Text { content });
        self.attach(id, leaf);
        id
    }

    /// Creates an element with attributes and text in one call.
    ///
    /// With a `parent` the element is appended to it, otherwise it becomes a
    /// new root. `attrs` is applied, then `text` is concatenated into a
    /// single text leaf. The leaf is attached even when `text` is empty, so
    /// the element always starts with one child. Returns the new element.
    ///
    /// ```
    /// use markupgen::{Attributes, Document};
    /// use markupgen::serial::serialize;
    ///
    /// let mut doc = Document::new();
    /// let ul = doc.create_element("ul");
    /// doc.element(Some(ul), "li", [("class", "first")], &["one"]);
    /// let last = doc.element(Some(ul), "li", Attributes::new(), &["t", "wo"]);
    /// assert_eq!(serialize(&doc, last), r#"<ul><li class="first">one</li><li>two</li></ul>"#);
    /// ```
    pub fn element(
        &mut self,
        parent: Option<NodeId>,
        tag: &str,
        attrs: impl Into<Attributes>,
        text: &[&str],
    ) -> NodeId {
        let id = match parent {
            Some(parent) => self.append_element(parent, tag),
            None => self.create_element(tag),
        };
        self.attributes_mut(id).extend(attrs.into());
        self.append_text(id, &text.concat())
    }

    // --- Navigation ---

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the root of the tree containing `id` (`id` itself for roots
    /// and detached nodes).
    #[must_use]
    pub fn root(&self, id: NodeId) -> NodeId {
        self.node(id).root
    }

    /// Returns the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    /// Returns the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    /// Returns the number of children of a node.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Returns the first child of the node's parent, or `None` for a node
    /// without a parent.
    #[must_use]
    pub fn first_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).and_then(|p| self.first_child(p))
    }

    /// Returns the last child of the node's parent, or `None` for a node
    /// without a parent.
    #[must_use]
    pub fn last_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).and_then(|p| self.last_child(p))
    }

    /// Returns the sibling immediately before `id`.
    ///
    /// Falls back to `id` itself when it is the first child or has no
    /// parent, unlike [`next_sibling`](Self::next_sibling).
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> NodeId {
        if self.parent(id).is_none() {
            return id;
        }
        self.node(id).prev_sibling.unwrap_or(id)
    }

    /// Returns the sibling immediately after `id`, or `None` when it is the
    /// last child or has no parent.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id)?;
        self.node(id).next_sibling
    }

    /// Returns an iterator over the children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Returns an iterator over a node and its ancestors (walking up to root).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: Some(id),
        }
    }

    /// Returns an iterator over all descendants of a node (depth-first,
    /// pre-order, not including the node itself).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: self.first_child(id),
        }
    }

    // --- Mutation ---

    /// Removes `id` from its parent's children and returns the parent.
    ///
    /// The node is found by identity. Returns `None` if the node has no
    /// parent or is not among its parent's children. The removed subtree
    /// becomes a detached tree rooted at `id`; its slots are not reclaimed.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        if !self.children(parent).any(|c| c == id) {
            return None;
        }
        self.detach(id);
        self.set_root(id, id);
        Some(parent)
    }

    /// Links a detached `child` as the last child of `parent` and moves the
    /// child's subtree into `parent`'s tree.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.link(parent, child);
        let root = self.root(parent);
        self.set_root(child, root);
    }

    /// Appends `child` to `parent`'s child list without touching roots.
    fn link(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.node(child).parent.is_none(),
            "child already has a parent; detach it first"
        );

        self.node_mut(child).parent = Some(parent);

        if let Some(last) = self.node(parent).last_child {
            self.node_mut(last).next_sibling = Some(child);
            self.node_mut(child).prev_sibling = Some(last);
            self.node_mut(parent).last_child = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
            self.node_mut(parent).last_child = Some(child);
        }
    }

    /// Unlinks a node from its parent and siblings.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };

        let prev = self.node(id).prev_sibling;
        let next = self.node(id).next_sibling;

        match prev {
            Some(p) => self.node_mut(p).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }

        match next {
            Some(n) => self.node_mut(n).prev_sibling = prev,
            None => self.node_mut(parent).last_child = prev,
        }

        self.node_mut(id).parent = None;
        self.node_mut(id).prev_sibling = None;
        self.node_mut(id).next_sibling = None;
    }

    /// Sets `root` on `top` and every node below it.
    fn set_root(&mut self, top: NodeId, root: NodeId) {
        let below: Vec<NodeId> = self.descendants(top).collect();
        self.node_mut(top).root = root;
        for id in below {
            self.node_mut(id).root = root;
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes)
            .field("escape", &self.escape)
            .finish_non_exhaustive()
    }
}

// --- Iterators ---

/// Iterator over the children of a node.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).next_sibling;
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).parent;
        Some(current)
    }
}

/// Depth-first iterator over all descendants of a node.
pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        // Try to go deeper first
        if let Some(child) = self.doc.first_child(current) {
            self.next = Some(child);
            return Some(current);
        }

        // Try next sibling
        if let Some(sibling) = self.doc.node(current).next_sibling {
            self.next = Some(sibling);
            return Some(current);
        }

        // Walk up to find an ancestor with a next sibling
        let mut ancestor = self.doc.parent(current);
        while let Some(anc) = ancestor {
            if anc == self.root {
                self.next = None;
                return Some(current);
            }
            if let Some(sibling) = self.doc.node(anc).next_sibling {
                self.next = Some(sibling);
                return Some(current);
            }
            ancestor = self.doc.parent(anc);
        }

        self.next = None;
        Some(current)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::html::NoVoidElements;

    fn abc(doc: &mut Document) -> (NodeId, NodeId, NodeId, NodeId) {
        let root = doc.create_element("ul");
        let a = doc.append_element(root, "li");
        let b = doc.append_element(root, "li");
        let c = doc.append_element(root, "li");
        (root, a, b, c)
    }

    // -- Creation ------------------------------------------------------------

    #[test]
    fn test_create_element_is_own_root() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        assert_eq!(doc.root(div), div);
        assert_eq!(doc.parent(div), None);
        assert_eq!(doc.node_name(div), Some("div"));
        assert!(!doc.is_void(div));
    }

    #[test]
    fn test_create_empty_tag_is_fragment() {
        let mut doc = Document::new();
        let frag = doc.create_element("");
        assert!(!doc.is_element(frag));
        assert_eq!(doc.node_text(frag), Some(""));
        assert_eq!(doc.node_name(frag), None);
    }

    #[test]
    fn test_append_element_links_parent_and_root() {
        let mut doc = Document::new();
        let html = doc.create_element("html");
        let body = doc.append_element(html, "body");
        let p = doc.append_element(body, "p");

        assert_eq!(doc.parent(p), Some(body));
        assert_eq!(doc.root(p), html);
        assert_eq!(doc.root(body), html);
        assert_eq!(doc.first_child(html), Some(body));
        assert_eq!(doc.last_child(body), Some(p));
    }

    #[test]
    fn test_void_flag_from_lookup() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let img = doc.append_element(div, "img");
        let br = doc.append_element(div, "BR");
        assert!(doc.is_void(img));
        assert!(doc.is_void(br));
        assert!(!doc.is_void(div));
    }

    #[test]
    fn test_custom_void_lookup() {
        let mut doc = Document::with_void_elements(|tag: &str| tag == "slot");
        let slot = doc.create_element("slot");
        let img = doc.create_element("img");
        assert!(doc.is_void(slot));
        assert!(!doc.is_void(img));

        let mut plain = Document::with_void_elements(NoVoidElements);
        let br = plain.create_element("br");
        assert!(!plain.is_void(br));
    }

    #[test]
    fn test_try_append_element_rejects_bad_names() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        assert!(doc.try_append_element(div, "").is_err());
        assert!(doc.try_append_element(div, "bad tag").is_err());
        assert_eq!(doc.child_count(div), 0);
        let span = doc.try_append_element(div, "span").unwrap();
        assert_eq!(doc.parent(span), Some(div));
    }

    // -- Copying -------------------------------------------------------------

    #[test]
    fn test_append_copy_is_deep_with_new_identity() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.set_attribute(a, "href", "/x");
        doc.append_text(a, "link");

        let div = doc.create_element("div");
        let copy = doc.append_copy(div, a);

        assert_ne!(copy, a);
        assert_eq!(doc.parent(copy), Some(div));
        assert_eq!(doc.root(copy), div);
        assert_eq!(doc.attribute(copy, "href"), Some(&AttrValue::from("/x")));
        let text = doc.first_child(copy).unwrap();
        assert_ne!(Some(text), doc.first_child(a));
        assert_eq!(doc.node_text(text), Some("link"));
        assert_eq!(doc.root(text), div);

        // The original is untouched.
        assert_eq!(doc.parent(a), None);
        doc.set_attribute(copy, "href", "/y");
        assert_eq!(doc.attribute(a, "href"), Some(&AttrValue::from("/x")));
    }

    #[test]
    fn test_append_copy_of_ancestor() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let inner = doc.append_element(root, "span");
        let copy = doc.append_copy(inner, root);

        // The copy holds the span as it was before the copy was attached.
        let copied_span = doc.first_child(copy).unwrap();
        assert_eq!(doc.node_name(copied_span), Some("span"));
        assert_eq!(doc.first_child(copied_span), None);
        assert_eq!(doc.root(copied_span), root);
    }

    #[test]
    fn test_append_copy_keeps_void_flag() {
        let mut doc = Document::new();
        let img = doc.create_element("img");
        let p = doc.create_element("p");
        let copy = doc.append_copy(p, img);
        assert!(doc.is_void(copy));
    }

    #[test]
    fn test_import_node() {
        let mut other = Document::new();
        let li = other.create_element("li");
        other.set_attribute(li, "class", ["x", "y"]);
        other.append_text(li, "item");

        let mut doc = Document::with_void_elements(NoVoidElements);
        let ul = doc.create_element("ul");
        let imported = doc.import_node(ul, &other, li);
        assert_eq!(doc.node_name(imported), Some("li"));
        assert_eq!(doc.attribute(imported, "class"), Some(&AttrValue::from(["x", "y"])));
        assert_eq!(doc.root(imported), ul);
        let text = doc.first_child(imported).unwrap();
        assert_eq!(doc.node_text(text), Some("item"));
        assert_eq!(doc.root(text), ul);
    }

    #[test]
    fn test_copy_preserves_nested_order() {
        let mut doc = Document::new();
        let ul = doc.create_element("ul");
        for label in ["1", "2", "3"] {
            let li = doc.append_element(ul, "li");
            doc.append_text(li, label);
            doc.append_element(li, "br");
        }
        let mut other = Document::new();
        let target = other.create_element("div");
        other.import_node(target, &doc, ul);
        let section = doc.create_element("section");
        let copy = doc.append_copy(section, ul);

        let expected = "<ul><li>1<br/></li><li>2<br/></li><li>3<br/></li></ul>";
        let opts = EscapeOptions::default();
        assert_eq!(crate::serial::serialize_subtree(&doc, copy, &opts), expected);
        assert_eq!(
            crate::serial::serialize(&other, target),
            format!("<div>{expected}</div>")
        );
    }

    #[test]
    fn test_copy_and_import_deep_chain() {
        let mut doc = Document::new();
        let top = doc.create_element("d");
        let mut current = top;
        for _ in 0..200_000 {
            current = doc.append_element(current, "d");
        }

        let holder = doc.create_element("p");
        let copy = doc.append_copy(holder, top);
        assert_eq!(doc.descendants(copy).count(), 200_000);
        assert_eq!(doc.root(copy), holder);

        let mut other = Document::new();
        let target = other.create_element("p");
        let imported = other.import_node(target, &doc, top);
        assert_eq!(other.descendants(imported).count(), 200_000);
        assert_eq!(other.node_count(), 200_002);
    }

    // -- Attributes ----------------------------------------------------------

    #[test]
    fn test_attribute_operations() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        let same = doc.set_attributes(input, [("type", "checkbox"), ("name", "ok")]);
        assert_eq!(same, input);
        doc.set_attribute(input, "checked", true);

        assert!(doc.has_attribute(input, "checked"));
        assert_eq!(doc.attribute(input, "type"), Some(&AttrValue::from("checkbox")));
        assert_eq!(doc.remove_attribute(input, "name"), Some(AttrValue::from("ok")));
        assert!(!doc.has_attribute(input, "name"));

        doc.set_attribute(input, "checked", AttrValue::Null);
        assert!(!doc.has_attribute(input, "checked"));
        assert_eq!(doc.attributes(input).keys().collect::<Vec<_>>(), ["type"]);
    }

    // -- Text ----------------------------------------------------------------

    #[test]
    fn test_append_text_returns_same_node() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        assert_eq!(doc.append_text(p, "hello"), p);
        let leaf = doc.first_child(p).unwrap();
        assert_eq!(doc.node_text(leaf), Some("hello"));
        assert_eq!(doc.parent(leaf), Some(p));
        assert_eq!(doc.root(leaf), p);
    }

    #[test]
    fn test_append_text_escapes_at_attach_time() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.append_text(p, "<raw>");
        doc.set_escape_options(EscapeOptions::default().enabled(true));
        doc.append_text(p, "<safe>");
        doc.set_escape_options(EscapeOptions::default());

        let texts: Vec<&str> = doc
            .children(p)
            .filter_map(|c| doc.node_text(c))
            .collect();
        assert_eq!(texts, ["<raw>", "&lt;safe&gt;"]);
    }

    #[test]
    fn test_element_convenience() {
        let mut doc = Document::new();
        let root = doc.element(None, "a", [("href", "/")], &["Ho", "me"]);
        assert_eq!(doc.parent(root), None);
        assert_eq!(doc.attribute(root, "href"), Some(&AttrValue::from("/")));
        assert_eq!(doc.child_count(root), 1);
        let text = doc.first_child(root).unwrap();
        assert_eq!(doc.node_text(text), Some("Home"));

        let bare = doc.element(Some(root), "span", Attributes::new(), &[]);
        assert_eq!(doc.parent(bare), Some(root));
        assert_eq!(doc.child_count(bare), 1);
        let empty = doc.first_child(bare).unwrap();
        assert_eq!(doc.node_text(empty), Some(""));
    }

    #[test]
    fn test_element_empty_leaf_is_first_sibling() {
        let mut doc = Document::new();
        let ul = doc.element(None, "ul", Attributes::new(), &[]);
        let li = doc.append_element(ul, "li");
        let leaf = doc.first_child(ul).unwrap();
        assert_eq!(doc.child_count(ul), 2);
        assert_ne!(leaf, li);
        assert_eq!(doc.previous_sibling(li), leaf);
        assert_eq!(doc.first_sibling(li), Some(leaf));
        assert_eq!(crate::serial::serialize(&doc, ul), "<ul><li></li></ul>");
    }

    // -- Navigation ----------------------------------------------------------

    #[test]
    fn test_sibling_navigation() {
        let mut doc = Document::new();
        let (_, a, b, c) = abc(&mut doc);

        assert_eq!(doc.previous_sibling(b), a);
        assert_eq!(doc.next_sibling(b), Some(c));
        assert_eq!(doc.previous_sibling(a), a);
        assert_eq!(doc.next_sibling(c), None);
        assert_eq!(doc.first_sibling(c), Some(a));
        assert_eq!(doc.last_sibling(a), Some(c));
    }

    #[test]
    fn test_navigation_without_parent() {
        let mut doc = Document::new();
        let lone = doc.create_element("div");
        assert_eq!(doc.previous_sibling(lone), lone);
        assert_eq!(doc.next_sibling(lone), None);
        assert_eq!(doc.first_sibling(lone), None);
        assert_eq!(doc.last_sibling(lone), None);
    }

    #[test]
    fn test_navigation_uses_identity() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let a = doc.append_element(root, "br");
        let b = doc.append_element(root, "br");
        let c = doc.append_element(root, "hr");

        // a and b are structurally identical; b must still resolve to itself.
        assert_eq!(doc.next_sibling(b), Some(c));
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.remove(b), Some(root));
        let children: Vec<NodeId> = doc.children(root).collect();
        assert_eq!(children, vec![a, c]);
    }

    #[test]
    fn test_remove() {
        let mut doc = Document::new();
        let (root, a, b, c) = abc(&mut doc);
        let leaf = doc.append_element(b, "em");

        assert_eq!(doc.remove(b), Some(root));
        let children: Vec<NodeId> = doc.children(root).collect();
        assert_eq!(children, vec![a, c]);
        assert_eq!(doc.previous_sibling(c), a);
        assert_eq!(doc.next_sibling(a), Some(c));

        // The removed subtree is a tree of its own.
        assert_eq!(doc.parent(b), None);
        assert_eq!(doc.root(b), b);
        assert_eq!(doc.root(leaf), b);
    }

    #[test]
    fn test_remove_without_parent() {
        let mut doc = Document::new();
        let lone = doc.create_element("div");
        assert_eq!(doc.remove(lone), None);
    }

    #[test]
    fn test_removed_slots_stay_allocated() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        for _ in 0..1000 {
            let li = doc.append_element(list, "li");
            doc.remove(li);
        }
        assert_eq!(doc.child_count(list), 0);
        assert_eq!(doc.node_count(), 1001);
    }

    #[test]
    fn test_remove_first_and_last() {
        let mut doc = Document::new();
        let (root, a, b, c) = abc(&mut doc);
        doc.remove(a);
        doc.remove(c);
        assert_eq!(doc.first_child(root), Some(b));
        assert_eq!(doc.last_child(root), Some(b));
        assert_eq!(doc.previous_sibling(b), b);
        assert_eq!(doc.next_sibling(b), None);
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let mut doc = Document::new();
        let (root, a, b, _) = abc(&mut doc);
        let em = doc.append_element(a, "em");

        let up: Vec<NodeId> = doc.ancestors(em).collect();
        assert_eq!(up, vec![em, a, root]);

        let down: Vec<NodeId> = doc.descendants(root).collect();
        assert_eq!(down.len(), 4);
        assert_eq!(down[0], a);
        assert_eq!(down[1], em);
        assert_eq!(down[2], b);
        assert!(doc.descendants(em).next().is_none());
    }

    #[test]
    fn test_node_id_raw_roundtrip() {
        let mut doc = Document::new();
        let first = doc.create_element("a");
        assert_eq!(first.into_raw(), 1);
        assert_eq!(NodeId::from_raw(first.into_raw()), Some(first));
        assert_eq!(NodeId::from_raw(0), None);
        assert_eq!(doc.node_count(), 1);
    }
}
