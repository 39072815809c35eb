//! Void-element lookup.
//!
//! A void element is one that always self-closes and never renders content
//! (`<br/>`, `<img/>`). Which tag names are void is configuration supplied to
//! the [`Document`](crate::Document) when it is created; the tree asks the
//! lookup once per element, when the element is created, and stores the
//! answer on the node.
//!
//! Three lookups are provided:
//!
//! - [`HtmlVoidElements`], the HTML void list (the default)
//! - [`NoVoidElements`], for documents where every element closes normally
//! - any `Fn(&str) -> bool` closure
//!
//! ```
//! use markupgen::html::{HtmlVoidElements, VoidElements};
//!
//! assert!(HtmlVoidElements.is_void("img"));
//! assert!(HtmlVoidElements.is_void("BR"));
//! assert!(!HtmlVoidElements.is_void("div"));
//!
//! let custom = |tag: &str| tag == "marker";
//! assert!(custom.is_void("marker"));
//! ```

use std::fmt;

/// Decides whether a tag name denotes a void element.
pub trait VoidElements {
    /// Returns `true` if elements named `tag` must self-close.
    fn is_void(&self, tag: &str) -> bool;
}

impl<F> VoidElements for F
where
    F: Fn(&str) -> bool,
{
    fn is_void(&self, tag: &str) -> bool {
        self(tag)
    }
}

/// The HTML void elements, matched ignoring ASCII case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlVoidElements;

impl VoidElements for HtmlVoidElements {
    fn is_void(&self, tag: &str) -> bool {
        is_void_element(&tag.to_ascii_lowercase())
    }
}

/// A lookup under which no element is void.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoVoidElements;

impl VoidElements for NoVoidElements {
    fn is_void(&self, _tag: &str) -> bool {
        false
    }
}

/// A void lookup extended with extra tag names.
///
/// Used by the command line tool's `--void` flag.
///
/// ```
/// use markupgen::html::{ExtraVoidElements, HtmlVoidElements, VoidElements};
///
/// let lookup = ExtraVoidElements::new(HtmlVoidElements, ["marker"]);
/// assert!(lookup.is_void("marker"));
/// assert!(lookup.is_void("hr"));
/// ```
pub struct ExtraVoidElements<V> {
    base: V,
    extra: Vec<String>,
}

impl<V: VoidElements> ExtraVoidElements<V> {
    /// Wraps `base`, additionally treating every name in `extra` as void.
    pub fn new<I, S>(base: V, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base,
            extra: extra.into_iter().map(Into::into).collect(),
        }
    }
}

impl<V: VoidElements> VoidElements for ExtraVoidElements<V> {
    fn is_void(&self, tag: &str) -> bool {
        self.base.is_void(tag) || self.extra.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl<V> fmt::Debug for ExtraVoidElements<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraVoidElements")
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}

// --- Void elements (elements that must not have content) ---
// HTML 4.01 plus the later additions in common use.

/// Returns true if the given tag name (lowercase) is a void element that
/// must not have content.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
            | "basefont"
            | "frame"
            | "isindex"
    )
}
