//! # Pathscad Core
//!
//! Geometry primitives for the SVG to OpenSCAD conversion pipeline.
//! Provides the fundamental types the rest of the workspace builds on:
//!
//! 1. **geometry** - points and axis-aligned bounding boxes
//! 2. **transform** - 2D affine transforms in SVG matrix layout
//! 3. **bezier** - cubic Bézier segments and curve flattening
//! 4. **units** - SVG length parsing (px, pt, pc, mm, cm, in)

pub mod bezier;
pub mod geometry;
pub mod transform;
pub mod units;

pub use bezier::{flatten, CubicSegment};
pub use geometry::{BoundingBox, Point};
pub use transform::Transform;
pub use units::{Length, LengthUnit, ParseLengthError};
