#![no_main]
use libfuzzer_sys::fuzz_target;
use markupgen::serial::serialize_with_options;
use markupgen::{AttrValue, Convention, Document, EscapeOptions};

// Interprets the input as a stream of build instructions, one per line:
// `+tag` appends and descends, `-` climbs, `@key=value` sets an attribute,
// `!key` sets a boolean, `x` removes the current node, anything else is text.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut doc = Document::new();
    let root = doc.create_element("root");
    let mut current = root;
    for line in s.lines() {
        if let Some(tag) = line.strip_prefix('+') {
            current = doc.append_element(current, tag);
        } else if line == "-" {
            current = doc.parent(current).unwrap_or(root);
        } else if let Some(attr) = line.strip_prefix('@') {
            let (key, value) = attr.split_once('=').unwrap_or((attr, ""));
            doc.set_attribute(current, key, value);
        } else if let Some(key) = line.strip_prefix('!') {
            doc.set_attribute(current, key, AttrValue::Bool(key.len() % 2 == 0));
        } else if line == "x" {
            current = doc.remove(current).unwrap_or(root);
        } else {
            doc.append_text(current, line);
        }
    }
    // Rendering must never panic, and must always render from the root.
    for convention in Convention::ALL {
        for enabled in [false, true] {
            let opts = EscapeOptions::default().enabled(enabled).convention(convention);
            let _ = serialize_with_options(&doc, current, &opts);
        }
    }
});
