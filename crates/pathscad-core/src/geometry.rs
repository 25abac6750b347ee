//! Points and axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

/// A 2D point in document units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned bounding box, derived once from a vertex list and then
/// immutable. Containment checks are non-strict: a point on an edge
/// counts as inside. The box is only ever a fast-reject filter, never a
/// containment proof on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Computes the box with a single min/max sweep over the vertices.
    /// Returns `None` for an empty vertex list.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox {
            xmin: first.x,
            xmax: first.x,
            ymin: first.y,
            ymax: first.y,
        };
        for p in &points[1..] {
            bbox.xmin = bbox.xmin.min(p.x);
            bbox.xmax = bbox.xmax.max(p.x);
            bbox.ymin = bbox.ymin.min(p.y);
            bbox.ymax = bbox.ymax.max(p.y);
        }
        Some(bbox)
    }

    /// Whether the point lies within the box, edges included.
    pub fn contains_point(&self, p: Point) -> bool {
        !(p.x < self.xmin || p.x > self.xmax || p.y < self.ymin || p.y > self.ymax)
    }

    /// Whether `other` lies entirely within this box, touching edges
    /// included.
    pub fn contains_bbox(&self, other: &BoundingBox) -> bool {
        !(other.xmin < self.xmin
            || other.xmax > self.xmax
            || other.ymin < self.ymin
            || other.ymax > self.ymax)
    }

    /// The smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point {
        Point::new(
            self.xmin + (self.xmax - self.xmin) / 2.0,
            self.ymin + (self.ymax - self.ymin) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}
