//! Cubic Bézier segments and curve flattening.
//!
//! Flattening subdivides segments until the control polygon of every
//! segment stays within a tolerance of its chord, then collects the
//! segment boundary points as polyline vertices.

use crate::geometry::Point;
use crate::transform::Transform;

/// One cubic Bézier segment: start, two control points, end.
///
/// Straight edges are stored as degenerate cubics with the control
/// points collapsed onto the endpoints, so a whole subpath is always a
/// uniform segment sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicSegment {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// A straight edge from `from` to `to`.
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(from, from, to, to)
    }

    /// Zero-length segment with all four points coincident. Flattening
    /// skips these without producing a vertex.
    pub fn is_degenerate(&self) -> bool {
        self.p0 == self.p1 && self.p1 == self.p2 && self.p2 == self.p3
    }

    /// Maximum perpendicular deviation of the control points from the
    /// chord. This is the flatness measure driving subdivision: a
    /// straight edge measures 0 regardless of length.
    pub fn max_deviation(&self) -> f64 {
        let d1 = point_segment_distance(self.p1, self.p0, self.p3);
        let d2 = point_segment_distance(self.p2, self.p0, self.p3);
        d1.max(d2)
    }

    /// De Casteljau split at the midpoint parameter. Each half keeps the
    /// curve exactly; repeated halving drives the deviation toward 0.
    pub fn split_half(&self) -> (CubicSegment, CubicSegment) {
        let m01 = midpoint(self.p0, self.p1);
        let m12 = midpoint(self.p1, self.p2);
        let m23 = midpoint(self.p2, self.p3);
        let m012 = midpoint(m01, m12);
        let m123 = midpoint(m12, m23);
        let m = midpoint(m012, m123);
        (
            CubicSegment::new(self.p0, m01, m012, m),
            CubicSegment::new(m, m123, m23, self.p3),
        )
    }

    /// Maps all four control points through an affine transform.
    pub fn transformed(&self, t: &Transform) -> CubicSegment {
        CubicSegment::new(
            t.apply(self.p0),
            t.apply(self.p1),
            t.apply(self.p2),
            t.apply(self.p3),
        )
    }
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Distance from `p` to the line segment `a`-`b`.
fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * dx, a.y + t * dy);
    p.distance_to(&proj)
}

/// Flattens an ordered segment sequence into polyline vertices.
///
/// Any segment whose control polygon deviates from its chord by more
/// than `tolerance` is split at the midpoint, and the whole list is
/// re-scanned until no segment exceeds the tolerance. The output is the
/// ordered list of segment boundary points; zero-length segments are
/// dropped without a vertex. An empty segment sequence or a
/// non-positive tolerance yields an empty result, which callers treat
/// as "no geometry produced".
pub fn flatten(segments: &[CubicSegment], tolerance: f64) -> Vec<Point> {
    if segments.is_empty() || tolerance <= 0.0 {
        return Vec::new();
    }

    let mut work: Vec<CubicSegment> = segments.to_vec();
    loop {
        let mut split_any = false;
        let mut i = 0;
        while i < work.len() {
            if work[i].max_deviation() > tolerance {
                let (first, second) = work[i].split_half();
                work[i] = first;
                work.insert(i + 1, second);
                split_any = true;
                // re-test the first half before moving on
            } else {
                i += 1;
            }
        }
        if !split_any {
            break;
        }
    }

    let mut vertices = Vec::with_capacity(work.len() + 1);
    vertices.push(work[0].p0);
    for seg in &work {
        if seg.is_degenerate() {
            continue;
        }
        vertices.push(seg.p3);
    }
    vertices
}
