//! Tree building tests.
//!
//! Covers element creation, the fluent cursor, attribute maps, text
//! attachment and subtree copying through the public API.

#![allow(clippy::unwrap_used)]

use markupgen::html::{ExtraVoidElements, HtmlVoidElements, NoVoidElements};
use markupgen::serial::serialize;
use markupgen::{AttrValue, Attributes, Convention, Document, ErrorKind, EscapeOptions};
use pretty_assertions::assert_eq;

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
fn test_append_element_shares_root() {
    let mut doc = Document::new();
    let html = doc.create_element("html");
    let body = doc.append_element(html, "body");
    let p = doc.append_element(body, "p");
    assert_eq!(doc.root(p), html);
    assert_eq!(doc.root(body), html);
    assert_eq!(doc.parent(p), Some(body));
}

#[test]
fn test_empty_tag_is_fragment() {
    let mut doc = Document::new();
    let frag = doc.create_element("");
    assert!(!doc.is_element(frag));
    assert_eq!(doc.node_text(frag), Some(""));
    assert_eq!(serialize(&doc, frag), "");
}

#[test]
fn test_void_flag_set_at_creation() {
    let mut doc = Document::new();
    let img = doc.create_element("img");
    let input = doc.create_element("INPUT");
    let span = doc.create_element("span");
    assert!(doc.is_void(img));
    assert!(doc.is_void(input));
    assert!(!doc.is_void(span));
}

#[test]
fn test_custom_void_lookups() {
    let mut none = Document::with_void_elements(NoVoidElements);
    let br = none.create_element("br");
    assert!(!none.is_void(br));

    let mut closure = Document::with_void_elements(|tag: &str| tag.starts_with("x-"));
    let custom = closure.create_element("x-icon");
    assert!(closure.is_void(custom));

    let mut extended = Document::with_void_elements(ExtraVoidElements::new(HtmlVoidElements, ["marker"]));
    let marker = extended.create_element("marker");
    let hr = extended.create_element("hr");
    assert!(extended.is_void(marker));
    assert!(extended.is_void(hr));
}

#[test]
fn test_builder_chain_matches_nesting() {
    let mut doc = Document::new();
    let root = doc
        .build_root("table")
        .element("tr")
        .element("td")
        .text("1")
        .parent()
        .unwrap()
        .element("td")
        .text("2")
        .root();
    assert_eq!(
        serialize(&doc, root),
        "<table><tr><td>1</td><td>2</td></tr></table>"
    );
}

#[test]
fn test_builder_attr_returns_same_focus() {
    let mut doc = Document::new();
    let builder = doc.build_root("a").attr("href", "/").attr("title", "home");
    let id = builder.id();
    let parent = builder.parent();
    assert!(parent.is_none());
    assert_eq!(doc.attributes(id).len(), 2);
}

#[test]
fn test_element_helper_with_parent_and_text() {
    let mut doc = Document::new();
    let ul = doc.create_element("ul");
    let li = doc.element(Some(ul), "li", [("class", "item")], &["a", "b", "c"]);
    assert_eq!(doc.parent(li), Some(ul));
    assert_eq!(doc.child_count(li), 1);
    let leaf = doc.first_child(li).unwrap();
    assert_eq!(doc.node_text(leaf), Some("abc"));
}

#[test]
fn test_element_helper_without_parent_or_text() {
    let mut doc = Document::new();
    let p = doc.element(None, "p", Attributes::new(), &[]);
    assert_eq!(doc.root(p), p);
    assert_eq!(doc.child_count(p), 1);
    let leaf = doc.first_child(p).unwrap();
    assert_eq!(doc.node_text(leaf), Some(""));
    assert_eq!(serialize(&doc, p), "<p></p>");

    let em = doc.append_element(p, "em");
    assert_eq!(doc.previous_sibling(em), leaf);
}

#[test]
fn test_try_append_element_rejects_bad_names() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let err = doc.try_append_element(div, "1bad").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidName);
    let err = doc.try_append_element(div, "").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidName);
    assert_eq!(doc.child_count(div), 0);

    let ok = doc.try_append_element(div, "svg:rect").unwrap();
    assert_eq!(doc.node_name(ok), Some("svg:rect"));
}

// -- Attributes --------------------------------------------------------------

#[test]
fn test_set_attribute_overwrites_in_place() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.set_attributes(a, [("href", "/"), ("rel", "x"), ("id", "l")]);
    doc.set_attribute(a, "rel", "nofollow");
    let keys: Vec<&str> = doc.attributes(a).keys().collect();
    assert_eq!(keys, vec!["href", "rel", "id"]);
    assert_eq!(doc.attribute(a, "rel").and_then(AttrValue::as_str), Some("nofollow"));
}

#[test]
fn test_null_value_removes_attribute() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.set_attribute(a, "href", "/");
    doc.set_attribute(a, "href", AttrValue::Null);
    assert!(!doc.has_attribute(a, "href"));

    doc.set_attribute(a, "title", "t");
    doc.set_attribute(a, "title", None::<String>);
    assert!(doc.attributes(a).is_empty());
}

#[test]
fn test_remove_attribute_returns_value() {
    let mut doc = Document::new();
    let input = doc.create_element("input");
    doc.set_attribute(input, "checked", true);
    assert_eq!(doc.remove_attribute(input, "checked"), Some(AttrValue::Bool(true)));
    assert_eq!(doc.remove_attribute(input, "checked"), None);
}

#[test]
fn test_attribute_value_kinds() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    doc.set_attribute(div, "class", vec!["a", "b"]);
    doc.set_attribute(div, "tabindex", 3);
    doc.set_attribute(div, "hidden", false);
    assert_eq!(
        doc.attribute(div, "class").and_then(AttrValue::as_list),
        Some(&["a".to_string(), "b".to_string()][..])
    );
    assert_eq!(doc.attribute(div, "tabindex").and_then(AttrValue::as_str), Some("3"));
    assert_eq!(doc.attribute(div, "hidden").and_then(AttrValue::as_bool), Some(false));
}

#[test]
fn test_attributes_mut_direct_edit() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    doc.attributes_mut(div).set("id", "main");
    doc.attributes_mut(div).set("role", "region");
    doc.attributes_mut(div).remove("id");
    assert_eq!(serialize(&doc, div), r#"<div role="region"></div>"#);
}

// -- Text --------------------------------------------------------------------

#[test]
fn test_text_does_not_shift_focus() {
    let mut doc = Document::new();
    let p = doc.create_element("p");
    let same = doc.append_text(p, "hello");
    assert_eq!(same, p);
    let leaf = doc.first_child(p).unwrap();
    assert_eq!(doc.node_text(leaf), Some("hello"));
    assert_eq!(doc.root(leaf), p);
}

#[test]
fn test_text_escaped_at_attach_time() {
    let mut doc = Document::new();
    let p = doc.create_element("p");
    doc.append_text(p, "a < b");
    doc.set_escape_options(EscapeOptions::default().enabled(true));
    doc.append_text(p, " & c");
    assert_eq!(serialize(&doc, p), "<p>a < b &amp; c</p>");
}

#[test]
fn test_text_escaped_with_html_entities() {
    let mut doc = Document::new().with_escape_options(
        EscapeOptions::default()
            .enabled(true)
            .convention(Convention::Html),
    );
    let p = doc.create_element("p");
    doc.append_text(p, "café © 'quoted'");
    assert_eq!(
        serialize(&doc, p),
        "<p>caf&eacute; &copy; &#039;quoted&#039;</p>"
    );
}

// -- Copies ------------------------------------------------------------------

#[test]
fn test_append_copy_is_deep_and_independent() {
    let mut doc = Document::new();
    let item = doc.create_element("li");
    doc.set_attribute(item, "class", "x");
    doc.append_text(item, "one");

    let list = doc.create_element("ul");
    let copy = doc.append_copy(list, item);
    doc.set_attribute(copy, "class", "y");

    assert_eq!(serialize(&doc, item), r#"<li class="x">one</li>"#);
    assert_eq!(serialize(&doc, list), r#"<ul><li class="y">one</li></ul>"#);
    assert_eq!(doc.root(copy), list);
    assert_eq!(doc.root(item), item);
}

#[test]
fn test_append_copy_of_ancestor_terminates() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let span = doc.append_element(div, "span");
    doc.append_copy(span, div);
    assert_eq!(
        serialize(&doc, div),
        "<div><span><div><span></span></div></span></div>"
    );
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
fn test_import_node_from_other_document() {
    let mut other = Document::with_void_elements(NoVoidElements);
    let br = other.create_element("br");
    other.append_text(br, "kept");

    let mut doc = Document::new();
    let p = doc.create_element("p");
    let imported = doc.import_node(p, &other, br);
    assert!(!doc.is_void(imported));
    assert_eq!(serialize(&doc, p), "<p><br>kept</br></p>");
    assert_eq!(doc.root(imported), p);
}
