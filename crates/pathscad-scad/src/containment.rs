//! Polygon containment tests.
//!
//! Classification decides, for every pair of polygons in a shape,
//! whether one lies inside the other. Holes are polygons contained by
//! another polygon; everything else is a solid outline. All tests run
//! through a bounding-box rejection before any ray cast happens.

use pathscad_core::{BoundingBox, Point};

#[cfg(test)]
thread_local! {
    static RAY_CASTS: std::cell::Cell<usize> = std::cell::Cell::new(0);
}

/// A flattened closed polygon with its cached bounding box.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<Point>,
    pub bbox: BoundingBox,
}

impl Polygon {
    /// Builds a polygon and caches its bounds. `None` when there are
    /// no vertices.
    pub fn new(vertices: Vec<Point>) -> Option<Polygon> {
        let bbox = BoundingBox::from_points(&vertices)?;
        Some(Polygon { vertices, bbox })
    }
}

/// Even-odd point-in-polygon test.
///
/// Points outside the bounding box are rejected without casting a
/// ray, and a point that coincides with a vertex counts as inside.
pub fn point_in_polygon(p: Point, poly: &Polygon) -> bool {
    if !poly.bbox.contains_point(p) {
        return false;
    }
    if poly.vertices.contains(&p) {
        return true;
    }

    #[cfg(test)]
    RAY_CASTS.with(|c| c.set(c.get() + 1));

    let pts = &poly.vertices;
    let n = pts.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        // half-open edge test keeps shared vertices from double counting
        if (pts[i].y > p.y) != (pts[j].y > p.y)
            && p.x < (pts[j].x - pts[i].x) * (p.y - pts[i].y) / (pts[j].y - pts[i].y) + pts[i].x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True when every vertex of `inner` lies inside `outer`. Bounding
/// boxes are compared first so disjoint polygons never ray cast.
pub fn polygon_in_polygon(inner: &Polygon, outer: &Polygon) -> bool {
    if !outer.bbox.contains_bbox(&inner.bbox) {
        return false;
    }
    inner.vertices.iter().all(|v| point_in_polygon(*v, outer))
}

/// Pairwise containment relations between the polygons of one shape.
#[derive(Debug, Default)]
pub struct ContainmentGraph {
    /// Indices of polygons each polygon contains.
    pub contains: Vec<Vec<usize>>,
    /// Indices of polygons each polygon is contained by.
    pub contained_by: Vec<Vec<usize>>,
}

impl ContainmentGraph {
    /// Polygons not contained by any other; these become solids, and
    /// their `contains` entries become the holes cut from them.
    pub fn toplevel(&self) -> impl Iterator<Item = usize> + '_ {
        self.contained_by
            .iter()
            .enumerate()
            .filter(|(_, parents)| parents.is_empty())
            .map(|(i, _)| i)
    }
}

/// Tests every unordered polygon pair once. When both orientations
/// would hold (degenerate coincident polygons) the first checked
/// direction wins.
pub fn classify(polygons: &[Polygon]) -> ContainmentGraph {
    let n = polygons.len();
    let mut contains = vec![Vec::new(); n];
    let mut contained_by = vec![Vec::new(); n];
    for i in 0..n {
        for j in i + 1..n {
            if polygon_in_polygon(&polygons[j], &polygons[i]) {
                contains[i].push(j);
                contained_by[j].push(i);
            } else if polygon_in_polygon(&polygons[i], &polygons[j]) {
                contains[j].push(i);
                contained_by[i].push(j);
            }
        }
    }
    ContainmentGraph {
        contains,
        contained_by,
    }
}
