//! Tag and attribute name validation.
//!
//! The builder accepts any string as a tag or attribute name; checking names
//! is left to callers that take names from untrusted input. The rules here
//! follow the XML `Name` production, restricted to what can be checked
//! per character:
//!
//! - the first character is an ASCII letter, `_`, `:` or any non-ASCII
//!   alphanumeric character
//! - later characters may also be ASCII digits, `-` or `.`
//!
//! See <https://www.w3.org/TR/xml/#NT-Name>

use crate::error::{ErrorKind, MarkupError};

fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':' || (!c.is_ascii() && c.is_alphanumeric())
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || c == '-' || c == '.'
}

/// Returns `true` if `name` can be used as a tag or attribute name.
///
/// # Examples
///
/// ```
/// use markupgen::util::name::is_valid_name;
///
/// assert!(is_valid_name("data-id"));
/// assert!(is_valid_name("xml:lang"));
/// assert!(!is_valid_name("1st"));
/// assert!(!is_valid_name("a b"));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Checks `name` and returns it unchanged when valid.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidName`] if the name is empty or contains a
/// character that cannot appear in a markup name.
pub fn validate_name(name: &str) -> Result<&str, MarkupError> {
    if name.is_empty() {
        return Err(MarkupError::new(ErrorKind::InvalidName, "name is empty"));
    }
    if is_valid_name(name) {
        Ok(name)
    } else {
        Err(MarkupError::new(
            ErrorKind::InvalidName,
            format!("'{name}' is not a valid markup name"),
        ))
    }
}
