//! Fluent building cursor.
//!
//! A `NodeBuilder` borrows the document and tracks the node a chain of calls
//! is focused on. Appending an element moves the focus to the new child;
//! attributes and text apply to the focused node and keep the focus where it
//! is. Use [`parent`](NodeBuilder::parent) to climb back out.

use super::{AttrValue, Attributes, Document, NodeId};

/// A cursor over a [`Document`] for chained tree construction.
///
/// # Examples
///
/// ```
/// use markupgen::Document;
/// use markupgen::serial::serialize;
///
/// let mut doc = Document::new();
/// let root = doc
///     .build_root("form")
///     .attr("method", "post")
///     .element("input")
///     .attr("name", "q")
///     .attr("required", true)
///     .parent()
///     .expect("input has a parent")
///     .element("button")
///     .text("Go")
///     .root();
///
/// assert_eq!(
///     serialize(&doc, root),
///     r#"<form method="post"><input name="q" required="required"/><button>Go</button></form>"#
/// );
/// ```
#[derive(Debug)]
pub struct NodeBuilder<'a> {
    doc: &'a mut Document,
    id: NodeId,
}

impl<'a> NodeBuilder<'a> {
    /// Returns the focused node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the document being built.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// Appends a child element and focuses it.
    #[must_use]
    pub fn element(self, tag: &str) -> Self {
        let id = self.doc.append_element(self.id, tag);
        Self { doc: self.doc, id }
    }

    /// Appends a child element with attributes and text, and focuses it.
    ///
    /// See [`Document::element`].
    #[must_use]
    pub fn element_with(self, tag: &str, attrs: impl Into<Attributes>, text: &[&str]) -> Self {
        let id = self.doc.element(Some(self.id), tag, attrs, text);
        Self { doc: self.doc, id }
    }

    /// Appends a deep copy of `source` and focuses the copy.
    #[must_use]
    pub fn copy_of(self, source: NodeId) -> Self {
        let id = self.doc.append_copy(self.id, source);
        Self { doc: self.doc, id }
    }

    /// Sets an attribute on the focused node. A `Null` value removes it.
    #[must_use]
    pub fn attr(self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.doc.set_attribute(self.id, key, value);
        self
    }

    /// Sets several attributes on the focused node.
    #[must_use]
    pub fn attrs<I, K, V>(self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        self.doc.set_attributes(self.id, attrs);
        self
    }

    /// Attaches text under the focused node without moving the focus.
    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.doc.append_text(self.id, text);
        self
    }

    /// Moves the focus to the parent, or returns `None` at a root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        let id = self.doc.parent(self.id)?;
        Some(Self { doc: self.doc, id })
    }

    /// Ends the chain and returns the root of the focused node's tree.
    #[must_use]
    pub fn root(self) -> NodeId {
        self.doc.root(self.id)
    }

    /// Ends the chain and returns the focused node.
    #[must_use]
    pub fn finish(self) -> NodeId {
        self.id
    }
}

impl Document {
    /// Starts a building chain focused on an existing node.
    pub fn build(&mut self, id: NodeId) -> NodeBuilder<'_> {
        NodeBuilder { doc: self, id }
    }

    /// Creates a new root for `tag` and starts a building chain on it.
    pub fn build_root(&mut self, tag: &str) -> NodeBuilder<'_> {
        let id = self.create_element(tag);
        NodeBuilder { doc: self, id }
    }
}
