//! Error types for SVG document handling.
//!
//! Only document-level failures surface as errors. Geometry-level
//! problems (malformed path data, degenerate shapes) are recovered
//! locally by skipping the shape, so they never appear here.

use thiserror::Error;

/// Errors that can occur while reading an SVG document.
#[derive(Error, Debug)]
pub enum SvgError {
    /// The XML could not be parsed.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element attribute was malformed.
    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// The document contained no root element.
    #[error("document has no root element")]
    MissingRoot,
}
