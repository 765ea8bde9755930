use std::io;

use thiserror::Error;

/// Errors surfaced by the rendering entry points.
///
/// Anything else that can go wrong with the input document (missing keys,
/// absent sections, "none" contact fields, missing artwork) is non-fatal and
/// handled in place, so it never shows up here.
#[derive(Error, Debug)]
pub enum Error {
    /// The output directory or file could not be created or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid resume document.
    #[error("invalid resume document: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected failure during layout or drawing.
    #[error("render error: {0}")]
    Render(String),
}
