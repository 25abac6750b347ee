//! # Pathscad SVG
//!
//! The document-model collaborator for the conversion pipeline: a small
//! owned SVG element tree, the transform-composing document walker, and
//! the parsers that normalize every supported element kind into cubic
//! Bézier subpaths.
//!
//! Supported shape elements: `path`, `rect`, `line`, `polyline`,
//! `polygon`, `ellipse`, `circle`. Everything else is treated as a
//! container and recursed into.

pub mod document;
pub mod error;
pub mod path_data;
pub mod shapes;
pub mod transform_list;

pub use document::{walk, Document, Element};
pub use error::SvgError;
pub use path_data::{parse_path_data, SubPath};
pub use shapes::{is_shape, shape_path_data};
pub use transform_list::parse_transform;
