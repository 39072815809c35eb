//! Error types for the fallible edges of the builder.
//!
//! Building and rendering a tree is total: attribute removal, children on
//! void elements and navigation off the edge of a sibling list all have a
//! defined result rather than an error. Errors only arise where outside input
//! is interpreted, i.e. name validation, convention names, output encodings
//! and command-line arguments.

use std::fmt;

/// The category of a [`MarkupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A tag or attribute name is empty or contains characters that cannot
    /// appear in a markup name.
    InvalidName,
    /// An attribute specification could not be interpreted (for example a
    /// `key=value` argument without `=`).
    InvalidAttribute,
    /// An escaping convention name was not recognized.
    UnknownConvention,
    /// An output encoding label is not known to `encoding_rs`.
    UnsupportedEncoding,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => write!(f, "invalid name"),
            Self::InvalidAttribute => write!(f, "invalid attribute"),
            Self::UnknownConvention => write!(f, "unknown convention"),
            Self::UnsupportedEncoding => write!(f, "unsupported encoding"),
        }
    }
}

/// The error type returned by the fallible operations of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable detail, usually quoting the offending input.
    pub message: String,
}

impl MarkupError {
    /// Creates a new error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for MarkupError {}
