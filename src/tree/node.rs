//! Node type definitions.
//!
//! The `NodeKind` enum distinguishes elements from text carriers. Navigation
//! links (parent, root, children, siblings) and attributes are stored in
//! `NodeData`, not here.

/// The kind of a node and its associated data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A tagged element, e.g. `<div class="x">`.
    Element {
        /// The tag name, exactly as given when the node was created.
        name: String,
        /// Whether the element self-closes. Decided by the document's
        /// void-element lookup when the node is created and never changed.
        void: bool,
    },

    /// A tagless node.
    ///
    /// With content this is a text leaf; with empty content and children
    /// it is a fragment that renders only its children.
    Text {
        /// Literal text, already escaped if escaping was enabled when it was
        /// attached.
        content: String,
    },
}

impl NodeKind {
    /// Builds the kind for a node created from `tag`.
    ///
    /// An empty tag yields an empty `Text` node (a fragment).
    pub(crate) fn from_tag(tag: &str, void: impl FnOnce(&str) -> bool) -> Self {
        if tag.is_empty() {
            Self::Text {
                content: String::new(),
            }
        } else {
            Self::Element {
                name: tag.to_string(),
                void: void(tag),
            }
        }
    }
}
