//! Parsing of SVG `transform` attribute lists.
//!
//! Supports `matrix`, `translate`, `scale`, `rotate` (with optional
//! center), `skewX` and `skewY`, whitespace or comma separated,
//! composed left to right. Unrecognized or malformed operations are
//! skipped with a warning rather than invalidating the whole list.

use pathscad_core::Transform;
use regex::Regex;
use tracing::warn;

/// Parses a transform list into a single composed transform.
pub fn parse_transform(list: &str) -> Transform {
    let re = Regex::new(r"([A-Za-z]+)\s*\(([^)]*)\)").expect("invalid transform regex");

    let mut result = Transform::IDENTITY;
    for caps in re.captures_iter(list) {
        let name = &caps[1];
        let args: Vec<f64> = caps[2]
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();

        let op = match (name, args.len()) {
            ("matrix", 6) => Transform::new(args[0], args[1], args[2], args[3], args[4], args[5]),
            ("translate", 1) => Transform::translate(args[0], 0.0),
            ("translate", 2) => Transform::translate(args[0], args[1]),
            ("scale", 1) => Transform::scale(args[0], args[0]),
            ("scale", 2) => Transform::scale(args[0], args[1]),
            ("rotate", 1) => Transform::rotate(args[0]),
            ("rotate", 3) => Transform::rotate_about(args[0], args[1], args[2]),
            ("skewX", 1) => Transform::skew_x(args[0]),
            ("skewY", 1) => Transform::skew_y(args[0]),
            _ => {
                warn!(op = name, args = args.len(), "skipping unsupported transform operation");
                continue;
            }
        };
        result = result * op;
    }
    result
}
