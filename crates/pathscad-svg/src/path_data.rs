//! SVG path data (`d` attribute) parsing into cubic subpaths.
//!
//! Every command is lowered to cubic Bézier segments: lines become
//! degenerate cubics with the control points on the endpoints,
//! quadratics are raised by degree elevation, and arcs are converted
//! through the endpoint-to-center parameterization into at most 90°
//! cubic approximations.
//!
//! Parsing is all-or-nothing: malformed data yields `None` and the
//! caller skips the shape.

use pathscad_core::{CubicSegment, Point};
use std::f64::consts::{FRAC_PI_2, PI};

/// One subpath: an ordered cubic segment sequence, optionally closed
/// by an explicit `Z`.
#[derive(Debug, Clone)]
pub struct SubPath {
    pub segments: Vec<CubicSegment>,
    pub closed: bool,
}

/// Parses path data into subpaths, or `None` when the data is
/// malformed (bad numbers, unknown commands, numbers before the first
/// command).
pub fn parse_path_data(d: &str) -> Option<Vec<SubPath>> {
    let tokens = tokenize_path_data(d);
    if tokens.is_empty() {
        return None;
    }
    PathParser::new(&tokens).run()
}

/// Splits path data into command and number tokens. Separators are
/// whitespace and commas; a `-` also starts a new number unless it
/// follows an exponent marker.
pub fn tokenize_path_data(d: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in d.chars() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '-' => {
                if !current.is_empty() && !current.ends_with(['e', 'E']) {
                    tokens.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

struct PathParser<'a> {
    tokens: &'a [String],
    pos: usize,
    current: Point,
    start: Point,
    prev_cubic_ctrl: Option<Point>,
    prev_quad_ctrl: Option<Point>,
    segments: Vec<CubicSegment>,
    subpaths: Vec<SubPath>,
}

impl<'a> PathParser<'a> {
    fn new(tokens: &'a [String]) -> Self {
        Self {
            tokens,
            pos: 0,
            current: Point::new(0.0, 0.0),
            start: Point::new(0.0, 0.0),
            prev_cubic_ctrl: None,
            prev_quad_ctrl: None,
            segments: Vec::new(),
            subpaths: Vec::new(),
        }
    }

    fn run(mut self) -> Option<Vec<SubPath>> {
        let mut cmd: Option<char> = None;

        while self.pos < self.tokens.len() {
            match self.tokens[self.pos].as_bytes() {
                [b] if b.is_ascii_alphabetic() => {
                    cmd = Some(*b as char);
                    self.pos += 1;
                }
                _ => {
                    // implicit repetition; extra moveto pairs become linetos
                    cmd = match cmd? {
                        'M' => Some('L'),
                        'm' => Some('l'),
                        other => Some(other),
                    };
                }
            }
            self.execute(cmd?)?;
        }

        self.finish_open_subpath();
        Some(self.subpaths)
    }

    fn execute(&mut self, cmd: char) -> Option<()> {
        let relative = cmd.is_ascii_lowercase();
        match cmd.to_ascii_uppercase() {
            'M' => {
                let p = self.pair(relative)?;
                self.finish_open_subpath();
                self.current = p;
                self.start = p;
                self.reset_ctrls();
            }
            'L' => {
                let p = self.pair(relative)?;
                self.line_to(p);
                self.reset_ctrls();
            }
            'H' => {
                let x = self.number()?;
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Point::new(x, self.current.y));
                self.reset_ctrls();
            }
            'V' => {
                let y = self.number()?;
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Point::new(self.current.x, y));
                self.reset_ctrls();
            }
            'C' => {
                let c1 = self.pair(relative)?;
                let c2 = self.pair(relative)?;
                let end = self.pair(relative)?;
                self.cubic_to(c1, c2, end);
            }
            'S' => {
                let c1 = self.reflect(self.prev_cubic_ctrl);
                let c2 = self.pair(relative)?;
                let end = self.pair(relative)?;
                self.cubic_to(c1, c2, end);
            }
            'Q' => {
                let ctrl = self.pair(relative)?;
                let end = self.pair(relative)?;
                self.quadratic_to(ctrl, end);
            }
            'T' => {
                let ctrl = self.reflect(self.prev_quad_ctrl);
                let end = self.pair(relative)?;
                self.quadratic_to(ctrl, end);
            }
            'A' => {
                let rx = self.number()?;
                let ry = self.number()?;
                let rotation = self.number()?;
                let large_arc = self.number()? != 0.0;
                let sweep = self.number()? != 0.0;
                let end = self.pair(relative)?;
                self.segments
                    .extend(arc_segments(self.current, rx, ry, rotation, large_arc, sweep, end));
                self.current = end;
                self.reset_ctrls();
            }
            'Z' => {
                if self.current != self.start {
                    let (current, start) = (self.current, self.start);
                    self.segments.push(CubicSegment::line(current, start));
                }
                if !self.segments.is_empty() {
                    self.subpaths.push(SubPath {
                        segments: std::mem::take(&mut self.segments),
                        closed: true,
                    });
                }
                self.current = self.start;
                self.reset_ctrls();
            }
            _ => return None,
        }
        Some(())
    }

    fn number(&mut self) -> Option<f64> {
        let token = self.tokens.get(self.pos)?;
        let value: f64 = token.parse().ok()?;
        self.pos += 1;
        Some(value)
    }

    fn pair(&mut self, relative: bool) -> Option<Point> {
        let x = self.number()?;
        let y = self.number()?;
        if relative {
            Some(Point::new(self.current.x + x, self.current.y + y))
        } else {
            Some(Point::new(x, y))
        }
    }

    fn line_to(&mut self, p: Point) {
        let from = self.current;
        self.segments.push(CubicSegment::line(from, p));
        self.current = p;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        let from = self.current;
        self.segments.push(CubicSegment::new(from, c1, c2, end));
        self.current = end;
        self.prev_cubic_ctrl = Some(c2);
        self.prev_quad_ctrl = None;
    }

    fn quadratic_to(&mut self, ctrl: Point, end: Point) {
        // degree elevation: cubic controls at 2/3 along each leg
        let from = self.current;
        let c1 = Point::new(
            from.x + 2.0 / 3.0 * (ctrl.x - from.x),
            from.y + 2.0 / 3.0 * (ctrl.y - from.y),
        );
        let c2 = Point::new(
            end.x + 2.0 / 3.0 * (ctrl.x - end.x),
            end.y + 2.0 / 3.0 * (ctrl.y - end.y),
        );
        self.segments.push(CubicSegment::new(from, c1, c2, end));
        self.current = end;
        self.prev_quad_ctrl = Some(ctrl);
        self.prev_cubic_ctrl = None;
    }

    /// Reflection of the previous control point about the current
    /// point; the current point itself when there is no continuation.
    fn reflect(&self, prev: Option<Point>) -> Point {
        match prev {
            Some(c) => Point::new(
                2.0 * self.current.x - c.x,
                2.0 * self.current.y - c.y,
            ),
            None => self.current,
        }
    }

    fn reset_ctrls(&mut self) {
        self.prev_cubic_ctrl = None;
        self.prev_quad_ctrl = None;
    }

    fn finish_open_subpath(&mut self) {
        if !self.segments.is_empty() {
            self.subpaths.push(SubPath {
                segments: std::mem::take(&mut self.segments),
                closed: false,
            });
        }
    }
}

/// Converts an elliptical arc to cubic segments via the SVG
/// endpoint-to-center parameterization, splitting the sweep into
/// slices of at most 90°.
fn arc_segments(
    from: Point,
    rx: f64,
    ry: f64,
    rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> Vec<CubicSegment> {
    if from == to {
        return Vec::new();
    }
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx == 0.0 || ry == 0.0 {
        return vec![CubicSegment::line(from, to)];
    }

    let phi = rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // scale radii up when the endpoints cannot be reached
    let lambda = x1p * x1p / (rx * rx) + y1p * y1p / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
    let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
    let mut coef = (num.max(0.0) / den).sqrt();
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;
    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let theta1 = vector_angle(1.0, 0.0, (x1p - cxp) / rx, (y1p - cyp) / ry);
    let mut delta = vector_angle(
        (x1p - cxp) / rx,
        (y1p - cyp) / ry,
        (-x1p - cxp) / rx,
        (-y1p - cyp) / ry,
    ) % (2.0 * PI);
    if !sweep && delta > 0.0 {
        delta -= 2.0 * PI;
    }
    if sweep && delta < 0.0 {
        delta += 2.0 * PI;
    }

    let n = ((delta.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let step = delta / n as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut segments = Vec::with_capacity(n);
    let mut theta = theta1;
    for i in 0..n {
        let theta_next = theta + step;
        let p1 = if i == 0 {
            from
        } else {
            ellipse_point(cx, cy, rx, ry, sin_phi, cos_phi, theta)
        };
        let p2 = if i == n - 1 {
            to
        } else {
            ellipse_point(cx, cy, rx, ry, sin_phi, cos_phi, theta_next)
        };
        let d1 = ellipse_derivative(rx, ry, sin_phi, cos_phi, theta);
        let d2 = ellipse_derivative(rx, ry, sin_phi, cos_phi, theta_next);
        segments.push(CubicSegment::new(
            p1,
            Point::new(p1.x + k * d1.x, p1.y + k * d1.y),
            Point::new(p2.x - k * d2.x, p2.y - k * d2.y),
            p2,
        ));
        theta = theta_next;
    }
    segments
}

fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    (ux * vy - uy * vx).atan2(ux * vx + uy * vy)
}

fn ellipse_point(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
    theta: f64,
) -> Point {
    let (sin_t, cos_t) = theta.sin_cos();
    Point::new(
        cx + rx * cos_t * cos_phi - ry * sin_t * sin_phi,
        cy + rx * cos_t * sin_phi + ry * sin_t * cos_phi,
    )
}

fn ellipse_derivative(rx: f64, ry: f64, sin_phi: f64, cos_phi: f64, theta: f64) -> Point {
    let (sin_t, cos_t) = theta.sin_cos();
    Point::new(
        -rx * sin_t * cos_phi - ry * cos_t * sin_phi,
        -rx * sin_t * sin_phi + ry * cos_t * cos_phi,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathscad_core::flatten;

    #[test]
    fn closed_rectangle_path() {
        let subpaths = parse_path_data("M 0,0 l 10,0 l 0,10 l -10,0 Z").unwrap();
        assert_eq!(subpaths.len(), 1);
        let sub = &subpaths[0];
        assert!(sub.closed);
        assert_eq!(sub.segments.len(), 4);
        let vertices = flatten(&sub.segments, 0.2);
        assert_eq!(vertices.first().copied(), vertices.last().copied());
        assert_eq!(vertices.len(), 5);
    }

    #[test]
    fn open_line_path() {
        let subpaths = parse_path_data("M 0,0 L 10,5").unwrap();
        assert_eq!(subpaths.len(), 1);
        assert!(!subpaths[0].closed);
        assert_eq!(subpaths[0].segments.len(), 1);
    }

    #[test]
    fn implicit_repetition_after_moveto_is_lineto() {
        let subpaths = parse_path_data("M 0 0 10 0 10 10").unwrap();
        assert_eq!(subpaths[0].segments.len(), 2);
        let vertices = flatten(&subpaths[0].segments, 0.2);
        assert_eq!(
            vertices,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        );
    }

    #[test]
    fn multiple_subpaths() {
        let subpaths = parse_path_data("M 0,0 h 10 v 10 h -10 Z M 3,3 h 4 v 4 h -4 Z").unwrap();
        assert_eq!(subpaths.len(), 2);
        assert!(subpaths.iter().all(|s| s.closed));
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let subpaths = parse_path_data("M 0,0 C 0,5 5,5 5,0 S 10,-5 10,0").unwrap();
        let segments = &subpaths[0].segments;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].p1, Point::new(5.0, -5.0));
    }

    #[test]
    fn quadratic_raises_to_cubic() {
        let subpaths = parse_path_data("M 0,0 Q 5,10 10,0").unwrap();
        let seg = subpaths[0].segments[0];
        assert!((seg.p1.x - 10.0 / 3.0).abs() < 1e-9);
        assert!((seg.p1.y - 20.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn negative_numbers_without_separator() {
        let subpaths = parse_path_data("M10-20L30-40").unwrap();
        let seg = subpaths[0].segments[0];
        assert_eq!(seg.p0, Point::new(10.0, -20.0));
        assert_eq!(seg.p3, Point::new(30.0, -40.0));
    }

    #[test]
    fn full_circle_from_two_arcs() {
        // the two-arc form a circle element normalizes to
        let subpaths = parse_path_data("M 0,5 A 5,5 0 1 0 10,5 A 5,5 0 1 0 0,5").unwrap();
        assert_eq!(subpaths.len(), 1);
        let vertices = flatten(&subpaths[0].segments, 0.05);
        assert!(vertices.len() > 8);
        for v in &vertices {
            let r = v.distance_to(&Point::new(5.0, 5.0));
            assert!((r - 5.0).abs() < 0.15, "vertex off circle: {:?} r={}", v, r);
        }
    }

    #[test]
    fn malformed_data_is_rejected() {
        assert!(parse_path_data("M 0,0 L banana").is_none());
        assert!(parse_path_data("10 20 30").is_none());
        assert!(parse_path_data("M 0,0 X 1,1").is_none());
        assert!(parse_path_data("").is_none());
    }

    #[test]
    fn lone_moveto_yields_no_subpaths() {
        let subpaths = parse_path_data("M 5,5").unwrap();
        assert!(subpaths.is_empty());
    }
}
