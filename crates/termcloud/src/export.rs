//! Turning a [`CloudLayout`] into an output document.

pub mod svg;

use crate::layout::CloudLayout;

/// Renders cloud layouts into a serialized document.
pub trait Exporter {
    /// Renders `layout` and returns the document text.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] when the layout cannot be represented in the
    /// output format.
    fn export_layout(&self, layout: &CloudLayout) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
