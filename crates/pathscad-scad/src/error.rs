use thiserror::Error;

/// Errors raised while generating OpenSCAD output.
#[derive(Debug, Error)]
pub enum ScadError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
