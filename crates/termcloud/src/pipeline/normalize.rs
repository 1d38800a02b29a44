//! Grouping distilled strings into unique cloud elements.

use indexmap::IndexMap;
use log::debug;

use termcloud_core::annotation::AnnotationRecord;

use super::CloudElement;
use crate::{error::TermCloudError, strategy::Distiller};

/// Rejects records whose p-value is not a finite, strictly positive number.
///
/// # Errors
///
/// Returns [`TermCloudError::InvalidRecord`] for the first offending record.
pub fn validate(records: &[AnnotationRecord]) -> Result<(), TermCloudError> {
    match records.iter().find(|record| !record.has_valid_p_value()) {
        Some(record) => Err(TermCloudError::InvalidRecord {
            term_id: record.term_id().to_string(),
            p_value: record.p_value(),
        }),
        None => Ok(()),
    }
}

/// Applies `distiller` to each record, pairing every produced string with a
/// copy of its record. Pair order follows record order, then distiller
/// output order.
pub fn distill(
    records: Vec<AnnotationRecord>,
    distiller: &dyn Distiller,
) -> Vec<(String, AnnotationRecord)> {
    let mut pairs = Vec::with_capacity(records.len());
    for record in records {
        let texts = distiller.distill(&record);
        if texts.is_empty() {
            debug!(term_id = record.term_id(); "Record produced no display text");
        }
        pairs.extend(texts.into_iter().map(|text| (text, record.clone())));
    }
    pairs
}

/// Merges pairs with the same text into one [`CloudElement`].
///
/// Elements appear in order of first occurrence; each element's records
/// keep encounter order.
pub fn normalize<I>(pairs: I) -> Vec<CloudElement>
where
    I: IntoIterator<Item = (String, AnnotationRecord)>,
{
    let mut grouped: IndexMap<String, Vec<AnnotationRecord>> = IndexMap::new();
    for (text, record) in pairs {
        grouped.entry(text).or_default().push(record);
    }
    grouped
        .into_iter()
        .map(|(text, records)| CloudElement::new(text, records))
        .collect()
}
