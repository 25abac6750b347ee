//! # Pathscad
//!
//! Converts SVG drawings to OpenSCAD programs of extruded polygons.
//! Closed paths become `linear_extrude`d polygons; paths drawn inside
//! other paths are detected by containment and subtracted as holes.
//!
//! ## Architecture
//!
//! Pathscad is organized as a workspace with multiple crates:
//!
//! 1. **pathscad-core** - Geometry: points, transforms, cubic Bézier
//!    flattening, units
//! 2. **pathscad-svg** - SVG parsing: documents, path data, shape
//!    normalization, transform lists
//! 3. **pathscad-scad** - Containment classification and OpenSCAD
//!    emission
//! 4. **pathscad** - Command line binary

use std::path::PathBuf;

pub use pathscad_scad::{ConvertParams, Converter};
pub use pathscad_svg::Document;

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

/// Expands an output path: surrounding quotes are stripped, a leading
/// `~` expands to the home directory, and relative paths resolve
/// against the current directory.
pub fn expand_output_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|s| s.strip_suffix('\''))
        })
        .unwrap_or(trimmed);

    let path = if let Some(rest) = trimmed.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(trimmed),
        }
    } else if trimmed == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(trimmed))
    } else {
        PathBuf::from(trimmed)
    };

    if path.is_relative() {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path,
        }
    } else {
        path
    }
}
