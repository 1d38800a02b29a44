//! Error adapter for converting TermCloudError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use termcloud::TermCloudError;

/// Adapter rendering a [`TermCloudError`] through miette.
///
/// None of the errors carry source locations, so the adapter only supplies
/// a code and, where one helps, a hint.
pub struct ErrorAdapter<'a>(pub &'a TermCloudError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TermCloudError::Io(_) => "termcloud::io",
            TermCloudError::Container { .. } => "termcloud::container",
            TermCloudError::UnknownCallback { .. } => "termcloud::callback",
            TermCloudError::DegenerateScore => "termcloud::score",
            TermCloudError::InvalidRecord { .. } => "termcloud::record",
            TermCloudError::Query(_) => "termcloud::query",
            TermCloudError::Config(_) => "termcloud::config",
            TermCloudError::Export(_) => "termcloud::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TermCloudError::Container { .. } => {
                "use `#id`, `.class` or a bare id that names a single output"
            }
            TermCloudError::UnknownCallback { .. } => {
                "word mode knows `words`, `abs_log_p`, `count`, `log`, `linear`, `rank` and `domain`; \
                 term mode uses `term` instead of `words`"
            }
            TermCloudError::DegenerateScore => "check that the input contains enriched terms",
            TermCloudError::InvalidRecord { .. } => "p-values must be finite and greater than zero",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`TermCloudError`] for rendering with a miette report handler.
pub fn to_reportable(err: &TermCloudError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
