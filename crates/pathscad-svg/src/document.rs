//! Owned SVG element tree and the transform-composing walker.
//!
//! The tree is built once with a quick-xml event loop and then walked
//! read-only. Namespace prefixes are stripped from element names, so
//! `svg:path` and `path` dispatch identically.

use crate::error::SvgError;
use crate::shapes;
use crate::transform_list::parse_transform;
use pathscad_core::{Length, Transform};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Width/height fallback when the document does not declare a usable
/// intrinsic size.
const DEFAULT_DOC_SIZE: f64 = 100.0;

/// One element of the document tree.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    attrs: HashMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    /// Local element name with any namespace prefix stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Attribute parsed as f64, with a default for missing or
    /// unparsable values.
    pub fn attr_f64(&self, key: &str, default: f64) -> f64 {
        self.attr(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element, SvgError> {
        let raw = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attrs = HashMap::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attrs.insert(key, value);
        }
        Ok(Element {
            name: raw,
            attrs,
            children: Vec::new(),
        })
    }

    #[cfg(test)]
    pub(crate) fn for_tests(name: &str, attrs: HashMap<String, String>) -> Element {
        Element {
            name: name.to_string(),
            attrs,
            children: Vec::new(),
        }
    }
}

/// A parsed SVG document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parses an SVG document from text.
    pub fn parse(text: &str) -> Result<Document, SvgError> {
        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(Element::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = Element::from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(element),
                            None => root = Some(element),
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        root.map(|root| Document { root })
            .ok_or(SvgError::MissingRoot)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Document intrinsic size in pixels. Absent or unparsable lengths
    /// fall back to the 100-unit default.
    pub fn size_px(&self) -> (f64, f64) {
        (self.length_attr_px("width"), self.length_attr_px("height"))
    }

    fn length_attr_px(&self, key: &str) -> f64 {
        match self.root.attr(key) {
            None => DEFAULT_DOC_SIZE,
            Some(raw) => match raw.parse::<Length>() {
                Ok(length) => length.to_px(),
                Err(_) => {
                    warn!(
                        attribute = key,
                        value = raw,
                        "unparsable document length, using default"
                    );
                    DEFAULT_DOC_SIZE
                }
            },
        }
    }

    /// Viewport scale derived from the `viewBox` attribute: intrinsic
    /// size over viewBox size on each axis. Identity when there is no
    /// viewBox or its dimensions are malformed or zero.
    pub fn viewport_transform(&self) -> Transform {
        let Some(viewbox) = self.root.attr("viewBox") else {
            return Transform::IDENTITY;
        };
        let parts: Vec<f64> = viewbox
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() == 4 && parts[2] != 0.0 && parts[3] != 0.0 {
            let (width, height) = self.size_px();
            Transform::scale(width / parts[2], height / parts[3])
        } else {
            Transform::IDENTITY
        }
    }
}

/// Walks the document in document order, composing `transform`
/// attributes top-down onto `base`, and calls `visit` for every shape
/// element with its accumulated transform.
///
/// With a non-empty `selection`, only subtrees rooted at an element
/// whose id is listed are visited; selected ids that never match log a
/// warning.
pub fn walk<F>(doc: &Document, base: Transform, selection: &[String], visit: &mut F)
where
    F: FnMut(&Element, Transform),
{
    let mut seen: HashSet<&str> = HashSet::new();
    walk_element(
        doc.root(),
        base,
        selection.is_empty(),
        selection,
        &mut seen,
        visit,
    );
    for id in selection {
        if !seen.contains(id.as_str()) {
            warn!(id = %id, "selected id not found in document");
        }
    }
}

fn walk_element<'a, F>(
    element: &'a Element,
    transform: Transform,
    active: bool,
    selection: &[String],
    seen: &mut HashSet<&'a str>,
    visit: &mut F,
) where
    F: FnMut(&Element, Transform),
{
    let transform = match element.attr("transform") {
        Some(list) => transform * parse_transform(list),
        None => transform,
    };

    let mut active = active;
    if let Some(id) = element.id() {
        if selection.iter().any(|s| s == id) {
            seen.insert(id);
            active = true;
        }
    }

    if shapes::is_shape(element.name()) {
        if active {
            visit(element, transform);
        }
        return;
    }

    for child in element.children() {
        walk_element(child, transform, active, selection, seen, visit);
    }
}
