//! Annotation records returned by the enrichment query service.
//!
//! An [`AnnotationRecord`] describes one enriched functional term: its
//! identifier, human-readable name, significance and the annotation
//! [`Domain`] it belongs to. Records are deserialized with serde and accept
//! the field names used by common enrichment services (`native`, `name`,
//! `source`) next to the canonical ones. Unrecognised fields are kept
//! verbatim in [`AnnotationRecord::extra`].

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Functional domain an enriched term comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Domain {
    /// GO biological process
    BP,
    /// GO molecular function
    MF,
    /// GO cellular component
    CC,
    Kegg,
    Reactome,
    WikiPathways,
    TranscriptionFactor,
    MicroRna,
    HumanProteinAtlas,
    Corum,
    HumanPhenotype,
    /// Any tag not listed above, kept as given
    Other(String),
}

impl Domain {
    /// Short tag used in output and configuration keys.
    pub fn tag(&self) -> &str {
        match self {
            Self::BP => "BP",
            Self::MF => "MF",
            Self::CC => "CC",
            Self::Kegg => "KEGG",
            Self::Reactome => "REAC",
            Self::WikiPathways => "WP",
            Self::TranscriptionFactor => "TF",
            Self::MicroRna => "MIRNA",
            Self::HumanProteinAtlas => "HPA",
            Self::Corum => "CORUM",
            Self::HumanPhenotype => "HP",
            Self::Other(tag) => tag,
        }
    }
}

impl FromStr for Domain {
    type Err = Infallible;

    /// Parses a domain tag case-insensitively; a `GO:` prefix is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        let tag = upper.strip_prefix("GO:").unwrap_or(&upper);
        Ok(match tag {
            "BP" => Self::BP,
            "MF" => Self::MF,
            "CC" => Self::CC,
            "KEGG" => Self::Kegg,
            "REAC" => Self::Reactome,
            "WP" => Self::WikiPathways,
            "TF" => Self::TranscriptionFactor,
            "MIRNA" => Self::MicroRna,
            "HPA" => Self::HumanProteinAtlas,
            "CORUM" => Self::Corum,
            "HP" => Self::HumanPhenotype,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

impl From<String> for Domain {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(domain) => domain,
            Err(never) => match never {},
        }
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.tag().to_string()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One enriched functional term.
///
/// # Examples
///
/// ```
/// # use termcloud_core::annotation::{AnnotationRecord, Domain};
/// let json = r#"{"native": "GO:0000082", "name": "G1/S transition",
///                "p_value": 1e-10, "source": "GO:BP", "intersection_size": 4}"#;
/// let record: AnnotationRecord = serde_json::from_str(json).unwrap();
///
/// assert_eq!(record.term_id(), "GO:0000082");
/// assert_eq!(record.domain(), &Domain::BP);
/// assert!(record.extra().contains_key("intersection_size"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(alias = "native", alias = "id")]
    term_id: String,

    #[serde(alias = "name")]
    term_name: String,

    #[serde(alias = "p", alias = "pvalue")]
    p_value: f64,

    #[serde(alias = "source")]
    domain: Domain,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl AnnotationRecord {
    /// Creates a record without pass-through fields.
    pub fn new(
        term_id: impl Into<String>,
        term_name: impl Into<String>,
        p_value: f64,
        domain: Domain,
    ) -> Self {
        Self {
            term_id: term_id.into(),
            term_name: term_name.into(),
            p_value,
            domain,
            extra: Map::new(),
        }
    }

    pub fn term_id(&self) -> &str {
        &self.term_id
    }

    pub fn term_name(&self) -> &str {
        &self.term_name
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Fields the service returned that termcloud does not interpret.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns true when the p-value is finite and strictly positive.
    pub fn has_valid_p_value(&self) -> bool {
        self.p_value.is_finite() && self.p_value > 0.0
    }
}
