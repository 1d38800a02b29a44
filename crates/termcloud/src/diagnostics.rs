//! Advisory reporting of elements that did not fit the canvas.

use std::fmt;

use log::warn;

use crate::layout::CloudLayout;

/// Which elements a layout pass dropped, and how many.
#[derive(Debug, Clone, PartialEq)]
pub struct DropReport {
    dropped: Vec<String>,
    total: usize,
}

impl DropReport {
    pub fn from_layout(layout: &CloudLayout) -> Self {
        Self {
            dropped: layout.dropped().to_vec(),
            total: layout.total(),
        }
    }

    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Number of elements the layout engine attempted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of attempted elements that were dropped, `0.0` for an empty pass.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.dropped.len() as f64 / self.total as f64
    }

    pub fn is_empty(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Logs the report at `warn` level when anything was dropped.
    pub fn log(&self) {
        if self.is_empty() {
            return;
        }
        warn!(
            dropped = self.dropped.len(),
            total = self.total,
            fraction = self.fraction();
            "{self}"
        );
    }
}

impl fmt::Display for DropReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} words did not fit ({:.0}%): {}",
            self.dropped.len(),
            self.total,
            self.fraction() * 100.0,
            self.dropped.join(", ")
        )
    }
}
