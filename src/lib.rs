//! # markupgen
//!
//! Build HTML and XML markup as a tree of elements, attributes and text
//! through chained calls, then render it with the right escaping and
//! void-element handling for the target dialect.
//!
//! ## Quick Start
//!
//! ```
//! use markupgen::{Convention, Document, EscapeOptions};
//!
//! let mut doc = Document::new()
//!     .with_escape_options(EscapeOptions::default().convention(Convention::Html));
//! let div = doc
//!     .build_root("div")
//!     .attr("class", ["a", "b"])
//!     .element("img")
//!     .attr("src", "x.png")
//!     .parent()
//!     .expect("img was appended to div")
//!     .text("Hi")
//!     .finish();
//!
//! assert_eq!(doc.display(div).to_string(), r#"<div class="a b"><img src="x.png"/>Hi</div>"#);
//! ```
//!
//! ## Layout
//!
//! - [`tree`]: the node arena, attribute map, navigation and the
//!   [`NodeBuilder`] cursor
//! - [`serial`]: rendering to a string (or encoded bytes)
//! - [`escape`]: conventions and the escape function
//! - [`html`]: the void-element lookup
//! - [`encoding`]: output transcoding

pub mod encoding;
pub mod error;
pub mod escape;
pub mod html;
pub mod serial;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use error::{ErrorKind, MarkupError};
pub use escape::{Convention, EscapeOptions};
pub use tree::{AttrValue, Attributes, Document, NodeBuilder, NodeId};
