//! Boundary to the enrichment query service.
//!
//! termcloud does not talk to any service itself. Callers provide an
//! [`AnnotationSource`] that turns [`QueryParameters`] into annotation
//! records; the source is invoked at most once per render pass and its
//! errors are surfaced unchanged.

use std::{fs, path::PathBuf};

use log::debug;
use thiserror::Error;

use termcloud_core::annotation::AnnotationRecord;

/// Parameters of an enrichment query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    genes: Vec<String>,
    organism: String,
}

impl QueryParameters {
    /// # Arguments
    ///
    /// * `genes` - Gene or protein identifiers to test for enrichment.
    /// * `organism` - Organism identifier understood by the service (e.g. `scerevisiae`).
    pub fn new<I, S>(genes: I, organism: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genes: genes.into_iter().map(Into::into).collect(),
            organism: organism.into(),
        }
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn organism(&self) -> &str {
        &self.organism
    }

    /// Builds a link that reproduces this query on the service's web page.
    ///
    /// # Examples
    ///
    /// ```
    /// # use termcloud::query::QueryParameters;
    /// let params = QueryParameters::new(["swi4", "swi6"], "scerevisiae");
    /// let url = params.query_url("https://example.org/gost");
    /// assert_eq!(url, "https://example.org/gost?organism=scerevisiae&query=swi4%20swi6");
    /// ```
    pub fn query_url(&self, base_url: &str) -> String {
        let query = self.genes.join(" ");
        format!(
            "{base_url}?organism={}&query={}",
            urlencoding::encode(&self.organism),
            urlencoding::encode(&query)
        )
    }
}

/// Errors reported by an [`AnnotationSource`].
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Something that can answer enrichment queries.
pub trait AnnotationSource {
    /// Runs the query and returns the enriched terms, in service order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the service cannot be reached or its
    /// response cannot be understood.
    fn query(&self, params: &QueryParameters) -> Result<Vec<AnnotationRecord>, QueryError>;
}

/// A source backed by a JSON file of previously fetched results.
///
/// The file holds either an array of records or an object with a `result`
/// array, the shape enrichment services commonly return. Query parameters
/// are not used to filter the file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AnnotationSource for JsonFileSource {
    fn query(&self, params: &QueryParameters) -> Result<Vec<AnnotationRecord>, QueryError> {
        debug!(
            path = self.path.display().to_string(),
            organism = params.organism();
            "Reading annotation results"
        );
        let content = fs::read_to_string(&self.path)
            .map_err(|err| QueryError::Unavailable(format!("{}: {err}", self.path.display())))?;
        parse_records(&content)
    }
}

/// Parses records from a JSON document.
///
/// # Errors
///
/// Returns [`QueryError::InvalidResponse`] if the document is neither an
/// array of records nor an object with a `result` array.
pub fn parse_records(json: &str) -> Result<Vec<AnnotationRecord>, QueryError> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Response {
        Records(Vec<AnnotationRecord>),
        Wrapped { result: Vec<AnnotationRecord> },
    }

    let response: Response =
        serde_json::from_str(json).map_err(|err| QueryError::InvalidResponse(err.to_string()))?;
    Ok(match response {
        Response::Records(records) | Response::Wrapped { result: records } => records,
    })
}
