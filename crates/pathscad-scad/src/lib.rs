//! Polygon containment classification and OpenSCAD source generation.
//!
//! Takes parsed SVG documents, flattens every drawable shape into
//! polygons, works out which polygons are holes in which others, and
//! writes an OpenSCAD program with one extrusion module per source
//! shape.

pub mod containment;
pub mod convert;
pub mod emit;
pub mod error;

pub use containment::{classify, point_in_polygon, polygon_in_polygon, ContainmentGraph, Polygon};
pub use convert::{ConvertParams, Converter};
pub use error::ScadError;
