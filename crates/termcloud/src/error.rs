//! Error types for termcloud operations.
//!
//! This module provides the main error type [`TermCloudError`]. Configuration,
//! container and callback problems are reported before any query or layout
//! work starts; words that do not fit the canvas are never errors and show up
//! in [`CloudLayout::dropped`](crate::layout::CloudLayout::dropped) instead.

use std::io;

use thiserror::Error;

use crate::{
    query::QueryError,
    strategy::{CallbackKind, Mode},
};

/// The main error type for termcloud operations.
#[derive(Debug, Error)]
pub enum TermCloudError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container selector did not resolve to exactly one surface.
    #[error("Container `{selector}` must match exactly one surface, found {matches}")]
    Container { selector: String, matches: usize },

    /// A named callback does not exist for the active mode.
    #[error("Unknown {kind} callback `{name}` in {mode} mode")]
    UnknownCallback {
        kind: CallbackKind,
        name: String,
        mode: Mode,
    },

    /// Every element scored zero, so scores cannot be normalized.
    #[error("Total score is zero; cannot normalize element scores")]
    DegenerateScore,

    #[error("Record `{term_id}` has invalid p-value {p_value}; expected a positive number")]
    InvalidRecord { term_id: String, p_value: f64 },

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TermCloudError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TermCloudError {
    /// Create a new `Container` error for `selector`.
    pub fn container(selector: impl Into<String>, matches: usize) -> Self {
        Self::Container {
            selector: selector.into(),
            matches,
        }
    }
}
