//! Output encoding.
//!
//! Rendered markup is a Rust `String` and therefore UTF-8. This module
//! transcodes it into another character set for callers that need bytes in
//! a legacy encoding, bridging to `encoding_rs`. Characters the target
//! encoding cannot represent are written as decimal numeric character
//! references (`&#8364;`), which is what `encoding_rs` produces for
//! unmappable characters and is valid in both HTML and XML text.

use encoding_rs::Encoding;

use crate::error::{ErrorKind, MarkupError};

/// Looks up an output encoding by its WHATWG label (case-insensitive).
///
/// UTF-16 and the `replacement` encoding are rejected: `encoding_rs` cannot
/// encode into them and would silently produce UTF-8 instead.
///
/// # Errors
///
/// Returns [`ErrorKind::UnsupportedEncoding`] if the label is unknown or
/// names an encoding that cannot be produced.
///
/// # Examples
///
/// ```
/// use markupgen::encoding::output_encoding;
///
/// assert_eq!(output_encoding("latin1").unwrap().name(), "windows-1252");
/// assert!(output_encoding("utf-16le").is_err());
/// assert!(output_encoding("klingon").is_err());
/// ```
pub fn output_encoding(label: &str) -> Result<&'static Encoding, MarkupError> {
    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        MarkupError::new(ErrorKind::UnsupportedEncoding, format!("unknown label '{label}'"))
    })?;
    if encoding.output_encoding() != encoding {
        return Err(MarkupError::new(
            ErrorKind::UnsupportedEncoding,
            format!("cannot encode output as {}", encoding.name()),
        ));
    }
    Ok(encoding)
}

/// Transcodes UTF-8 markup into the encoding named by `label`.
///
/// # Errors
///
/// Returns [`ErrorKind::UnsupportedEncoding`] if the label cannot be used as
/// an output encoding (see [`output_encoding`]).
///
/// # Examples
///
/// ```
/// use markupgen::encoding::encode;
///
/// let bytes = encode("<p>café €</p>", "iso-8859-1").unwrap();
/// // windows-1252 has both é and € (0x80)
/// assert_eq!(bytes, b"<p>caf\xE9 \x80</p>");
///
/// let bytes = encode("<p>日本</p>", "latin1").unwrap();
/// assert_eq!(bytes, b"<p>&#26085;&#26412;</p>");
/// ```
pub fn encode(markup: &str, label: &str) -> Result<Vec<u8>, MarkupError> {
    let encoding = output_encoding(label)?;
    let (bytes, _used, _unmappable) = encoding.encode(markup);
    Ok(bytes.into_owned())
}
