//! Escaping conventions and the escape function.
//!
//! Escaping is opt-in. When [`EscapeOptions::enabled`] is `false` (the
//! default) text and attribute values are emitted verbatim and callers are
//! responsible for anything that needs protecting. When enabled, values are
//! rewritten according to the active [`Convention`]:
//!
//! | Character | `Xml1` | `Html` / `Xhtml` |
//! |---|---|---|
//! | `&` `<` `>` `"` | `&amp;` `&lt;` `&gt;` `&quot;` | same |
//! | `'` | `&apos;` | `&#039;` |
//! | characters with an HTML 4.01 entity | unchanged | `&name;` |
//! | characters not allowed in the document type | U+FFFD | U+FFFD |
//!
//! The convention also drives attribute rendering (see [`Convention::is_xml`]).

pub mod entities;

use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorKind, MarkupError};

use self::entities::reverse_lookup_entity;

/// The target document dialect.
///
/// `Xml1` and `Xhtml` are XML conventions: boolean attributes render as
/// `key="key"` and `false` attributes render as `key=""`. Under `Html`
/// `true` attributes render as a bare key and `false` attributes are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Convention {
    /// HTML 4.01.
    Html,
    /// XML 1.0.
    #[default]
    Xml1,
    /// XHTML.
    Xhtml,
}

impl Convention {
    /// All conventions, in declaration order.
    pub const ALL: [Convention; 3] = [Convention::Html, Convention::Xml1, Convention::Xhtml];

    /// Returns `true` for the XML conventions (`Xml1` and `Xhtml`).
    #[must_use]
    pub fn is_xml(self) -> bool {
        matches!(self, Self::Xml1 | Self::Xhtml)
    }

    /// Returns `true` if `c` may appear in a document of this type.
    ///
    /// Disallowed characters are replaced with U+FFFD by [`escape`].
    fn allows(self, c: char) -> bool {
        let cp = u32::from(c);
        if matches!(c, '\t' | '\n' | '\r') {
            return true;
        }
        if cp < 0x20 || cp == 0xFFFE || cp == 0xFFFF {
            return false;
        }
        match self {
            // HTML 4.01 also excludes the noncharacters: U+FDD0..=U+FDEF and
            // the last two code points of every plane.
            Self::Html => {
                !(0x7F..=0x9F).contains(&cp)
                    && !(0xFDD0..=0xFDEF).contains(&cp)
                    && (cp & 0xFFFF) < 0xFFFE
            }
            Self::Xml1 | Self::Xhtml => true,
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Xml1 => write!(f, "xml1"),
            Self::Xhtml => write!(f, "xhtml"),
        }
    }
}

impl FromStr for Convention {
    type Err = MarkupError;

    /// Parses a convention name, ignoring ASCII case.
    ///
    /// Accepts `html`, `html401`, `xml`, `xml1` and `xhtml`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "html401" => Ok(Self::Html),
            "xml" | "xml1" => Ok(Self::Xml1),
            "xhtml" => Ok(Self::Xhtml),
            _ => Err(MarkupError::new(
                ErrorKind::UnknownConvention,
                format!("'{s}' (expected html, xml1 or xhtml)"),
            )),
        }
    }
}

/// Escaping configuration.
///
/// A [`Document`](crate::Document) holds one of these and consults it when
/// text is attached; the serializer takes one explicitly and consults it when
/// attribute values are emitted. Nothing is cached per node, so changing the
/// options between two renders changes the attribute output of the second.
///
/// # Examples
///
/// ```
/// use markupgen::escape::{Convention, EscapeOptions};
///
/// let opts = EscapeOptions::default()
///     .enabled(true)
///     .convention(Convention::Html);
/// assert!(opts.enabled);
/// assert!(!opts.convention.is_xml());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EscapeOptions {
    /// Whether text and attribute values are escaped. Defaults to `false`.
    pub enabled: bool,
    /// The document dialect. Defaults to [`Convention::Xml1`].
    pub convention: Convention,
}

impl EscapeOptions {
    /// Enables or disables escaping.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the document dialect.
    #[must_use]
    pub fn convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    /// Appends `value` to `out`, escaped if escaping is enabled.
    pub fn write_value(&self, out: &mut String, value: &str) {
        if self.enabled {
            write_escaped(out, value, self.convention);
        } else {
            out.push_str(value);
        }
    }

    /// Returns `value`, escaped if escaping is enabled.
    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        self.write_value(&mut out, value);
        out
    }
}

/// Escapes `input` for the given convention.
///
/// # Examples
///
/// ```
/// use markupgen::escape::{escape, Convention};
///
/// assert_eq!(escape("<a href=\"x\">", Convention::Xml1), "&lt;a href=&quot;x&quot;&gt;");
/// assert_eq!(escape("it's", Convention::Xml1), "it&apos;s");
/// assert_eq!(escape("it's", Convention::Html), "it&#039;s");
/// assert_eq!(escape("café", Convention::Html), "caf&eacute;");
/// assert_eq!(escape("café", Convention::Xml1), "café");
/// ```
#[must_use]
pub fn escape(input: &str, convention: Convention) -> String {
    let mut out = String::with_capacity(input.len());
    write_escaped(&mut out, input, convention);
    out
}

/// Appends `input` to `out`, escaped for the given convention.
pub fn write_escaped(out: &mut String, input: &str, convention: Convention) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' if convention == Convention::Xml1 => out.push_str("&apos;"),
            '\'' => out.push_str("&#039;"),
            c if !convention.allows(c) => out.push('\u{FFFD}'),
            c if !c.is_ascii() && convention != Convention::Xml1 => {
                if let Some(name) = reverse_lookup_entity(c) {
                    out.push('&');
                    out.push_str(name);
                    out.push(';');
                } else {
                    out.push(c);
                }
            }
            c => out.push(c),
        }
    }
}
