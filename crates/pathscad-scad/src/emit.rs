//! OpenSCAD source emission.
//!
//! One module per source shape, each wrapping its polygons in a
//! scaled union. Holes are subtracted with a small z fudge so the
//! difference never leaves coplanar faces.

use std::io::{self, Write};

use pathscad_core::Point;
use regex::Regex;

use crate::containment::{ContainmentGraph, Polygon};

const HEADER: &str = "\
// Module names are of the form poly_<inkscape-path-id>().
// You can associate a polygon in this OpenSCAD program with the corresponding
// SVG element in the Inkscape document by looking for the XML element with
// the attribute id=\"inkscape-path-id\".

// fudge value ensures that subtracted solids are slightly taller
// in the z dimension than the polygon being subtracted from.
fudge = 0.1;
";

/// A module name derived from an element id: the id stripped to
/// `[A-Za-z0-9_]`, or a generated `<n>x` name when the element had no
/// id at all.
pub fn module_name(id: Option<&str>, counter: &mut usize) -> String {
    match id {
        Some(raw) if !raw.is_empty() => {
            let sanitizer = Regex::new(r"[^A-Za-z0-9_]+").expect("invalid id pattern");
            sanitizer.replace_all(raw, "").into_owned()
        }
        _ => {
            let name = format!("{}x", counter);
            *counter += 1;
            name
        }
    }
}

/// Writes the pieces of an OpenSCAD program in order: header, one
/// module per shape, then the calls.
pub struct ScadWriter<W: Write> {
    out: W,
}

impl<W: Write> ScadWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn header(&mut self) -> io::Result<()> {
        self.out.write_all(HEADER.as_bytes())
    }

    pub fn no_paths_note(&mut self) -> io::Result<()> {
        self.out
            .write_all(b"\n// No valid paths found in the SVG file\n")
    }

    /// Emits one `module poly_<name>(h)` block. Polygons contained by
    /// another polygon are holes and only appear subtracted from
    /// their container.
    pub fn module(
        &mut self,
        name: &str,
        polygons: &[Polygon],
        graph: &ContainmentGraph,
        center: Point,
    ) -> io::Result<()> {
        write!(self.out, "\nmodule poly_{}(h)\n{{\n", name)?;
        write!(self.out, "  scale([25.4/90, -25.4/90, 1]) union()\n  {{\n")?;

        for i in graph.toplevel() {
            let holes = &graph.contains[i];
            if holes.is_empty() {
                write!(self.out, "    linear_extrude(height=h)\n      polygon([")?;
                self.points(&polygons[i], center)?;
                writeln!(self.out, "]);")?;
            } else {
                write!(self.out, "    difference()\n    {{\n")?;
                write!(self.out, "      linear_extrude(height=h)\n        polygon([")?;
                self.points(&polygons[i], center)?;
                writeln!(self.out, "]);")?;
                for &hole in holes {
                    writeln!(self.out, "      translate([0, 0, -fudge])")?;
                    writeln!(self.out, "        linear_extrude(height=h+2*fudge)")?;
                    write!(self.out, "          polygon([")?;
                    self.points(&polygons[hole], center)?;
                    writeln!(self.out, "]);")?;
                }
                writeln!(self.out, "    }}")?;
            }
        }

        write!(self.out, "  }}\n}}\n")
    }

    /// One module call per shape, after all module definitions.
    pub fn call(&mut self, name: &str, height: &str) -> io::Result<()> {
        writeln!(self.out, "poly_{}({});", name, height)
    }

    pub fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn points(&mut self, poly: &Polygon, center: Point) -> io::Result<()> {
        let mut first = true;
        for v in &poly.vertices {
            if !first {
                write!(self.out, ",")?;
            }
            write!(self.out, "[{},{}]", v.x - center.x, v.y - center.y)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containment::classify;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ])
        .unwrap()
    }

    #[test]
    fn names_are_sanitized() {
        let mut counter = 0;
        assert_eq!(module_name(Some("rect-1.2"), &mut counter), "rect12");
        assert_eq!(module_name(Some("ok_name"), &mut counter), "ok_name");
        assert_eq!(counter, 0);
    }

    #[test]
    fn missing_id_gets_generated_name() {
        let mut counter = 0;
        assert_eq!(module_name(None, &mut counter), "0x");
        assert_eq!(module_name(Some(""), &mut counter), "1x");
        assert_eq!(counter, 2);
    }

    #[test]
    fn sanitized_to_empty_keeps_empty_name() {
        let mut counter = 0;
        assert_eq!(module_name(Some("---"), &mut counter), "");
        assert_eq!(counter, 0);
    }

    #[test]
    fn simple_module_layout() {
        let polygons = vec![square(0.0, 0.0, 10.0)];
        let graph = classify(&polygons);
        let mut buf = Vec::new();
        let mut writer = ScadWriter::new(&mut buf);
        writer
            .module("r", &polygons, &graph, Point::new(5.0, 5.0))
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("module poly_r(h)"));
        assert!(text.contains("scale([25.4/90, -25.4/90, 1]) union()"));
        assert!(text.contains("polygon([[-5,-5],[5,-5],[5,5],[-5,5]]);"));
        assert!(!text.contains("difference()"));
    }

    #[test]
    fn holes_are_subtracted_with_fudge() {
        let polygons = vec![square(0.0, 0.0, 10.0), square(3.0, 3.0, 4.0)];
        let graph = classify(&polygons);
        let mut buf = Vec::new();
        let mut writer = ScadWriter::new(&mut buf);
        writer
            .module("d", &polygons, &graph, Point::new(0.0, 0.0))
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("difference()"));
        assert!(text.contains("translate([0, 0, -fudge])"));
        assert!(text.contains("linear_extrude(height=h+2*fudge)"));
        // the hole is emitted once, inside the difference only
        assert_eq!(text.matches("[3,3]").count(), 1);
    }

    #[test]
    fn call_includes_height_expression() {
        let mut buf = Vec::new();
        let mut writer = ScadWriter::new(&mut buf);
        writer.call("r", "5").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "poly_r(5);\n");
    }
}
