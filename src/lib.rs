//! A CommonMark parser and HTML renderer.
//!
//! Blocks are built line by line on an open spine, the tree is normalized,
//! and then every paragraph and heading has its inline content parsed, in
//! parallel across leaves.
//!
//! ```
//! use quire::{markdown_to_html, Options};
//!
//! assert_eq!(markdown_to_html("Hello, **世界**!", &Options::default()),
//!            "<p>Hello, <strong>世界</strong>!</p>\n");
//! ```
//!
//! Or you can parse the input into a [`Document`] yourself, walk it, and
//! render it with [`format_html`]:
//!
//! ```
//! use quire::nodes::NodeValue;
//! use quire::{format_html, parse_document, Options};
//!
//! let options = Options::default();
//! let doc = parse_document("# Title\n\n- a\n- b\n", &options);
//!
//! let headings = doc
//!     .descendants()
//!     .filter(|&id| matches!(doc.get(id).value, NodeValue::Heading(..)))
//!     .count();
//! assert_eq!(headings, 1);
//!
//! let mut html = vec![];
//! format_html(&doc, &options, &mut html).unwrap();
//! assert_eq!(
//!     String::from_utf8(html).unwrap(),
//!     "<h1>Title</h1>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
//! );
//! ```

#![deny(missing_debug_implementations, unstable_features, unused_import_braces)]
#![allow(unknown_lints, clippy::doc_markdown, clippy::too_many_arguments)]

pub mod arena;
mod ctype;
mod entity;
mod error;
pub mod html;
mod lexer;
pub mod nodes;
mod parser;
mod scanners;
mod strings;
#[cfg(test)]
mod tests;

use std::io::Write;

pub use crate::error::Error;
pub use crate::nodes::Document;
pub use crate::parser::options;
pub use crate::parser::{
    parse_document, parse_lines, Options, ParseOptions, RefMap, RenderOptions, ResolvedReference,
};

/// Render a parsed document to HTML.
pub fn format_html(doc: &Document, options: &Options, output: &mut dyn Write) -> std::io::Result<()> {
    html::format_document(doc, options, output)
}

/// Render Markdown to HTML.
///
/// See the documentation of the crate root for an example.
pub fn markdown_to_html(md: &str, options: &Options) -> String {
    let doc = parse_document(md, options);
    let mut bw = Vec::new();
    // Writing into a Vec cannot fail, and the renderer only ever writes
    // UTF-8.
    format_html(&doc, options, &mut bw).unwrap_or_default();
    String::from_utf8(bw).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Render Markdown given as raw bytes to HTML, rejecting input that is not
/// UTF-8.
///
/// ```
/// use quire::{markdown_bytes_to_html, Error, Options};
///
/// let options = Options::default();
/// assert_eq!(markdown_bytes_to_html(b"*hi*\n", &options).unwrap(),
///            "<p><em>hi</em></p>\n");
///
/// match markdown_bytes_to_html(b"ok\n\xff\n", &options) {
///     Err(Error::InvalidUtf8 { line, .. }) => assert_eq!(line, 2),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn markdown_bytes_to_html(md: &[u8], options: &Options) -> Result<String, Error> {
    let md = std::str::from_utf8(md).map_err(|e| Error::invalid_utf8(md, e))?;
    Ok(markdown_to_html(md, options))
}
