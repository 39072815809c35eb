//! Markup serialization.
//!
//! This module renders a tree back to HTML or XML text. Rendering always
//! covers the whole tree a node belongs to unless
//! [`serialize_subtree`] is used. Escaping and attribute style are taken from
//! an [`EscapeOptions`] value, either the document's own or one passed in.

pub mod markup;

use std::fmt;

pub use markup::{serialize, serialize_subtree, serialize_with_options};

use crate::error::MarkupError;
use crate::escape::EscapeOptions;
use crate::tree::{Document, NodeId};

/// Serializes the tree `id` belongs to and transcodes it into the encoding
/// named by `label`.
///
/// # Errors
///
/// Returns [`ErrorKind::UnsupportedEncoding`](crate::error::ErrorKind::UnsupportedEncoding)
/// if `label` cannot be used as an output encoding.
///
/// # Examples
///
/// ```
/// use markupgen::{Document, EscapeOptions};
/// use markupgen::serial::serialize_encoded;
///
/// let mut doc = Document::new();
/// let p = doc.create_element("p");
/// doc.append_text(p, "Ça va");
/// let bytes = serialize_encoded(&doc, p, &EscapeOptions::default(), "latin1").unwrap();
/// assert_eq!(bytes, b"<p>\xC7a va</p>");
/// ```
pub fn serialize_encoded(
    doc: &Document,
    id: NodeId,
    options: &EscapeOptions,
    label: &str,
) -> Result<Vec<u8>, MarkupError> {
    let markup = serialize_with_options(doc, id, options);
    crate::encoding::encode(&markup, label)
}

/// Renders a tree through `Display`, using the document's escape options.
///
/// Created by [`Document::display`].
pub struct NodeDisplay<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self.doc, self.id))
    }
}

impl fmt::Debug for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDisplay").field("id", &self.id).finish()
    }
}

impl Document {
    /// Returns a `Display` adapter rendering the whole tree `id` belongs to.
    ///
    /// ```
    /// use markupgen::Document;
    ///
    /// let mut doc = Document::new();
    /// let em = doc.build_root("p").element("em").text("hi").finish();
    /// assert_eq!(doc.display(em).to_string(), "<p><em>hi</em></p>");
    /// assert_eq!(format!("{}", doc.display(em)), "<p><em>hi</em></p>");
    /// ```
    #[must_use]
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { doc: self, id }
    }
}
