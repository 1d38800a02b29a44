//! Words that never make it into a word-mode cloud.

use std::collections::HashSet;

/// English function words plus terms that appear in so many annotation
/// names that they carry no information.
const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "into", "of", "on", "or", "the", "to",
    "via", "with", "within", "activity", "involved", "negative", "positive", "process",
    "regulation", "cellular", "cell", "protein", "binding", "pathway", "signaling", "response",
    "type", "other",
];

/// A case-insensitive set of excluded words.
///
/// # Examples
///
/// ```
/// # use termcloud::stopwords::StopWords;
/// let stopwords = StopWords::default();
/// assert!(stopwords.contains("Regulation"));
/// assert!(!stopwords.contains("mitotic"));
///
/// let custom = StopWords::new(["mitotic"]);
/// assert!(custom.contains("MITOTIC"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// An empty set, keeping every word.
    pub fn none() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Adds more words to the set (builder style).
    pub fn extended<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|word| word.as_ref().to_lowercase()));
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_empty() {
        assert!(StopWords::none().is_empty());
        assert!(!StopWords::none().contains("of"));
    }

    #[test]
    fn test_extended_keeps_defaults() {
        let stopwords = StopWords::default().extended(["Yeast"]);
        assert!(stopwords.contains("of"));
        assert!(stopwords.contains("yeast"));
        assert_eq!(stopwords.len(), DEFAULT_STOPWORDS.len() + 1);
    }
}
