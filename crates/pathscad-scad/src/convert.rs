//! Document conversion: SVG shapes to an OpenSCAD program.
//!
//! Conversion runs in three phases. All selected shapes are first
//! flattened into polygons while the overall bounds accumulate; the
//! translation center is then fixed from those bounds; finally each
//! shape is classified for holes and written out.

use std::io::Write;

use pathscad_core::{flatten, BoundingBox, Point};
use pathscad_svg::{parse_path_data, shape_path_data, walk, Document, Element};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::containment::{classify, Polygon};
use crate::emit::{module_name, ScadWriter};
use crate::error::ScadError;

/// Center used when the document contains no drawable geometry.
const DEFAULT_CENTER: Point = Point { x: 50.0, y: 50.0 };

const DEFAULT_SMOOTHNESS: f64 = 0.2;

/// Conversion parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertParams {
    /// Curve flattening tolerance in user units; smaller is smoother.
    pub smoothness: f64,
    /// Extrusion height, passed verbatim into the generated calls so
    /// OpenSCAD expressions work.
    pub height: String,
    /// Element ids to restrict conversion to; empty converts the
    /// whole document.
    pub ids: Vec<String>,
}

impl Default for ConvertParams {
    fn default() -> Self {
        Self {
            smoothness: DEFAULT_SMOOTHNESS,
            height: "5".to_string(),
            ids: Vec::new(),
        }
    }
}

/// Polygons collected from one SVG element.
struct ShapeGroup {
    id: Option<String>,
    polygons: Vec<Polygon>,
}

/// Converts parsed SVG documents to OpenSCAD text.
pub struct Converter {
    params: ConvertParams,
    shapes: Vec<ShapeGroup>,
    bounds: Option<BoundingBox>,
}

impl Converter {
    pub fn new(params: ConvertParams) -> Self {
        Self {
            params,
            shapes: Vec::new(),
            bounds: None,
        }
    }

    /// Converts `doc` and writes the OpenSCAD program to `out`.
    pub fn convert<W: Write>(&mut self, doc: &Document, out: W) -> Result<(), ScadError> {
        self.collect(doc);

        let center = match self.bounds {
            Some(b) => b.center(),
            None => DEFAULT_CENTER,
        };
        debug!(cx = center.x, cy = center.y, shapes = self.shapes.len(), "shapes collected");

        let mut writer = ScadWriter::new(out);
        writer.header()?;

        if self.shapes.is_empty() {
            writer.no_paths_note()?;
            return Ok(());
        }

        let mut counter = 0usize;
        let mut calls = Vec::with_capacity(self.shapes.len());
        for shape in &self.shapes {
            let name = module_name(shape.id.as_deref(), &mut counter);
            let graph = classify(&shape.polygons);
            writer.module(&name, &shape.polygons, &graph, center)?;
            calls.push(name);
        }
        writer.separator()?;
        for name in &calls {
            writer.call(name, &self.params.height)?;
        }
        Ok(())
    }

    /// Phase one: walk the document and flatten every drawable shape,
    /// growing the document bounds as polygons accumulate.
    fn collect(&mut self, doc: &Document) {
        let tolerance = if self.params.smoothness > 0.0 {
            self.params.smoothness
        } else {
            warn!(
                smoothness = self.params.smoothness,
                "smoothness must be positive, using default"
            );
            DEFAULT_SMOOTHNESS
        };

        let base = doc.viewport_transform();
        let ids = self.params.ids.clone();
        let mut shapes = Vec::new();
        let mut bounds = self.bounds;

        walk(doc, base, &ids, &mut |el, transform| {
            let Some(group) = flatten_element(el, &transform, tolerance, &mut bounds) else {
                return;
            };
            shapes.push(group);
        });

        self.shapes = shapes;
        self.bounds = bounds;
    }
}

/// Flattens one shape element into polygons under `transform`.
/// Subpaths that collapse below three distinct vertices are dropped;
/// an element with nothing left is skipped entirely.
fn flatten_element(
    el: &Element,
    transform: &pathscad_core::Transform,
    tolerance: f64,
    bounds: &mut Option<BoundingBox>,
) -> Option<ShapeGroup> {
    let d = shape_path_data(el)?;
    let Some(subpaths) = parse_path_data(&d) else {
        warn!(
            element = el.name(),
            id = el.id().unwrap_or(""),
            "skipping shape with unparsable path data"
        );
        return None;
    };

    let mut polygons = Vec::new();
    for sub in &subpaths {
        let segments: Vec<_> = sub.segments.iter().map(|s| s.transformed(transform)).collect();
        let mut vertices = flatten(&segments, tolerance);
        // a closed subpath repeats its start; drop the duplicate
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            debug!(
                element = el.name(),
                vertices = vertices.len(),
                "dropping degenerate subpath"
            );
            continue;
        }
        if let Some(poly) = Polygon::new(vertices) {
            *bounds = Some(match bounds {
                Some(b) => b.union(&poly.bbox),
                None => poly.bbox,
            });
            polygons.push(poly);
        }
    }

    if polygons.is_empty() {
        return None;
    }
    Some(ShapeGroup {
        id: el.id().map(str::to_string),
        polygons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_str(svg: &str, params: ConvertParams) -> String {
        let doc = Document::parse(svg).unwrap();
        let mut out = Vec::new();
        Converter::new(params).convert(&doc, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_document_writes_note() {
        let text = convert_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#,
            ConvertParams::default(),
        );
        assert!(text.contains("fudge = 0.1;"));
        assert!(text.contains("// No valid paths found in the SVG file"));
        assert!(!text.contains("module"));
    }

    #[test]
    fn open_subpath_is_treated_as_closed_polygon() {
        // triangle left open; the implicit closing edge still yields
        // three vertices
        let text = convert_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
                 <path id="t" d="M 0,0 L 10,0 L 5,8"/>
               </svg>"#,
            ConvertParams::default(),
        );
        assert!(text.contains("module poly_t(h)"));
        assert!(text.contains("poly_t(5);"));
    }

    #[test]
    fn line_element_is_degenerate() {
        let text = convert_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
                 <line x1="0" y1="0" x2="10" y2="10"/>
               </svg>"#,
            ConvertParams::default(),
        );
        assert!(text.contains("// No valid paths found in the SVG file"));
    }

    #[test]
    fn height_expression_passes_through() {
        let params = ConvertParams {
            height: "thickness*2".to_string(),
            ..ConvertParams::default()
        };
        let text = convert_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
                 <rect id="r" width="10" height="10"/>
               </svg>"#,
            params,
        );
        assert!(text.contains("poly_r(thickness*2);"));
    }
}
