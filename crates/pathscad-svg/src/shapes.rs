//! Normalization of basic shape elements to path data strings.
//!
//! Rects, lines, polylines, polygons, ellipses and circles are all
//! rewritten as an equivalent `d` string so the rest of the pipeline
//! only ever deals with path data. Ellipses and circles use the
//! standard two-arc form.

use crate::document::Element;
use tracing::warn;

const SHAPE_NAMES: &[&str] = &[
    "path", "rect", "line", "polyline", "polygon", "ellipse", "circle",
];

/// True for element names the converter treats as drawable shapes.
pub fn is_shape(name: &str) -> bool {
    SHAPE_NAMES.contains(&name)
}

/// Returns the path data equivalent of a shape element, or `None`
/// when the element has no usable geometry (missing `d`, zero radii,
/// too few polyline points).
pub fn shape_path_data(el: &Element) -> Option<String> {
    match el.name() {
        "path" => el.attr("d").map(str::to_string),
        "rect" => {
            let x = el.attr_f64("x", 0.0);
            let y = el.attr_f64("y", 0.0);
            let w = el.attr_f64("width", 0.0);
            let h = el.attr_f64("height", 0.0);
            Some(format!("M {},{} l {},0 l 0,{} l {},0 Z", x, y, w, h, -w))
        }
        "line" => {
            let x1 = el.attr_f64("x1", 0.0);
            let y1 = el.attr_f64("y1", 0.0);
            let x2 = el.attr_f64("x2", 0.0);
            let y2 = el.attr_f64("y2", 0.0);
            Some(format!("M {},{} L {},{}", x1, y1, x2, y2))
        }
        "polyline" | "polygon" => {
            let points = el.attr("points")?;
            let coords: Vec<f64> = points
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse().ok())
                .collect();
            if coords.len() < 4 {
                warn!(element = el.name(), "ignoring shape with too few points");
                return None;
            }
            let mut d = String::new();
            for (i, pair) in coords.chunks(2).enumerate() {
                if pair.len() < 2 {
                    break;
                }
                let op = if i == 0 { 'M' } else { 'L' };
                d.push_str(&format!("{} {},{} ", op, pair[0], pair[1]));
            }
            if el.name() == "polygon" {
                d.push('Z');
            }
            Some(d.trim_end().to_string())
        }
        "ellipse" | "circle" => {
            let (rx, ry) = if el.name() == "circle" {
                let r = el.attr_f64("r", 0.0);
                (r, r)
            } else {
                (el.attr_f64("rx", 0.0), el.attr_f64("ry", 0.0))
            };
            if rx == 0.0 || ry == 0.0 {
                warn!(element = el.name(), "ignoring shape with zero radius");
                return None;
            }
            let cx = el.attr_f64("cx", 0.0);
            let cy = el.attr_f64("cy", 0.0);
            let x1 = cx - rx;
            let x2 = cx + rx;
            Some(format!(
                "M {},{} A {},{} 0 1 0 {},{} A {},{} 0 1 0 {},{}",
                x1, cy, rx, ry, x2, cy, rx, ry, x1, cy
            ))
        }
        _ => None,
    }
}
