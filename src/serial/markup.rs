//! Markup serializer.
//!
//! Walks a tree depth-first and emits HTML or XML text. Elements render as
//! `<tag attrs>children</tag>`, void elements as `<tag attrs/>` with their
//! children dropped, and tagless nodes as their text followed by their
//! children.

use crate::escape::EscapeOptions;
use crate::tree::{AttrValue, Attributes, Document, NodeId, NodeKind};

/// Serializes the whole tree `id` belongs to, using the document's own
/// escape options.
///
/// Serialization always starts at the root, whichever node of the tree is
/// passed in.
///
/// # Examples
///
/// ```
/// use markupgen::Document;
/// use markupgen::serial::serialize;
///
/// let mut doc = Document::new();
/// let div = doc.create_element("div");
/// let p = doc.append_element(div, "p");
/// doc.append_text(p, "Hello");
/// assert_eq!(serialize(&doc, p), "<div><p>Hello</p></div>");
/// ```
#[must_use]
pub fn serialize(doc: &Document, id: NodeId) -> String {
    serialize_with_options(doc, id, &doc.escape_options())
}

/// Serializes the whole tree `id` belongs to with the given options.
///
/// The options decide how attributes render; text was escaped (or not) when
/// it was attached.
///
/// # Examples
///
/// ```
/// use markupgen::{Convention, Document, EscapeOptions};
/// use markupgen::serial::serialize_with_options;
///
/// let mut doc = Document::new();
/// let input = doc.create_element("input");
/// doc.set_attribute(input, "disabled", true);
/// doc.set_attribute(input, "checked", false);
///
/// let html = EscapeOptions::default().convention(Convention::Html);
/// assert_eq!(serialize_with_options(&doc, input, &html), "<input disabled/>");
///
/// let xhtml = EscapeOptions::default().convention(Convention::Xhtml);
/// assert_eq!(
///     serialize_with_options(&doc, input, &xhtml),
///     r#"<input disabled="disabled" checked=""/>"#
/// );
/// ```
#[must_use]
pub fn serialize_with_options(doc: &Document, id: NodeId, options: &EscapeOptions) -> String {
    serialize_subtree(doc, doc.root(id), options)
}

/// Serializes only the subtree rooted at `id`.
///
/// # Examples
///
/// ```
/// use markupgen::{Document, EscapeOptions};
/// use markupgen::serial::serialize_subtree;
///
/// let mut doc = Document::new();
/// let ul = doc.create_element("ul");
/// let li = doc.append_element(ul, "li");
/// doc.append_text(li, "one");
/// assert_eq!(serialize_subtree(&doc, li, &EscapeOptions::default()), "<li>one</li>");
/// ```
#[must_use]
pub fn serialize_subtree(doc: &Document, id: NodeId, options: &EscapeOptions) -> String {
    let mut output = String::new();
    serialize_node(doc, id, &mut output, options);
    output
}

/// A pending step of the depth-first walk.
enum Step<'a> {
    Open(NodeId),
    Close(&'a str),
}

fn serialize_node(doc: &Document, id: NodeId, out: &mut String, options: &EscapeOptions) {
    // Explicit stack so arbitrarily deep trees cannot overflow the call stack.
    let mut stack = vec![Step::Open(id)];
    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Open(id) => id,
            Step::Close(name) => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
                continue;
            }
        };

        let data = doc.node(id);
        match &data.kind {
            NodeKind::Element { name, void } => {
                out.push('<');
                out.push_str(name);
                write_attributes(out, &data.attributes, options);

                // Void elements: no content, no closing tag
                if *void {
                    out.push_str("/>");
                    continue;
                }

                out.push('>');
                stack.push(Step::Close(name));
            }
            NodeKind::Text { content } => out.push_str(content),
        }

        let first = stack.len();
        stack.extend(doc.children(id).map(Step::Open));
        stack[first..].reverse();
    }
}

/// Writes ` key="value"` pairs in insertion order.
///
/// - `Null` is skipped, and so is `false` outside the XML conventions
/// - `true` is a bare key under `Html` and `key="key"` under `Xml1`/`Xhtml`
/// - `false` under `Xml1`/`Xhtml` is `key=""`
/// - lists are joined with single spaces, each item escaped on its own
fn write_attributes(out: &mut String, attributes: &Attributes, options: &EscapeOptions) {
    let xml = options.convention.is_xml();
    for (key, value) in attributes.iter() {
        match value {
            AttrValue::Null => continue,
            AttrValue::Bool(false) if !xml => continue,
            AttrValue::Bool(true) if !xml => {
                out.push(' ');
                out.push_str(key);
                continue;
            }
            _ => {}
        }

        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        match value {
            AttrValue::Bool(true) => options.write_value(out, key),
            AttrValue::Text(text) => options.write_value(out, text),
            AttrValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    options.write_value(out, item);
                }
            }
            AttrValue::Null | AttrValue::Bool(false) => {}
        }
        out.push('"');
    }
}
