use std::fmt;

use fst::Streamer;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::tokenizer::Tokenizer;
use crate::vocabulary::{count_documents, WordCountTable};

/// Number of categories the model distinguishes. Added to every smoothing
/// denominator, so both per-category tables share it.
pub const NUM_CATEGORIES: usize = 2;

/// Smoothed `log P(word occurs | category)` for every word.
///
/// Words seen in training are stored in an fst map (values are `f64` bits);
/// every other word resolves to the Laplace estimate of a zero count.
pub struct LogProbabilityTable {
    map: fst::Map<Vec<u8>>,
    default: f64,
    documents: usize,
}

impl LogProbabilityTable {
    /// Smoothed log-probability for `word`, falling back to the unseen-word default.
    pub fn get(&self, word: &str) -> f64 {
        self.map.get(word).map(f64::from_bits).unwrap_or(self.default)
    }

    /// Whether `word` was seen in the training documents of this category.
    pub fn contains(&self, word: &str) -> bool {
        self.map.contains_key(word)
    }

    /// Value returned for words absent from the table: `-ln(n + k)`.
    pub fn default_log_probability(&self) -> f64 {
        self.default
    }

    /// Number of training documents the table was estimated from.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Number of words with a stored estimate.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Stored words and their log-probabilities in lexicographic order.
    pub fn entries(&self) -> Vec<(String, f64)> {
        let mut entries = Vec::with_capacity(self.map.len());
        let mut stream = self.map.stream();
        while let Some((key, value)) = stream.next() {
            entries.push((String::from_utf8_lossy(key).into_owned(), f64::from_bits(value)));
        }
        entries
    }

    pub(crate) fn map(&self) -> &fst::Map<Vec<u8>> {
        &self.map
    }

    /// Builds the table from per-word document counts of one category.
    pub fn from_counts(counts: WordCountTable) -> Result<Self> {
        let documents = counts.documents();
        let log_denominator = ((documents + NUM_CATEGORIES) as f64).ln();
        let default = -log_denominator;

        let mut builder = fst::MapBuilder::memory();
        for (word, count) in counts.into_sorted() {
            let log_probability = (count as f64 + 1.0).ln() - log_denominator;
            if !(log_probability < 0.0) {
                return Err(Error::InvariantViolation {
                    word,
                    log_probability,
                });
            }
            builder.insert(&word, log_probability.to_bits())?;
        }

        let map = fst::Map::new(builder.into_inner()?)?;
        Ok(Self {
            map,
            default,
            documents,
        })
    }
}

impl fmt::Debug for LogProbabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogProbabilityTable")
            .field("words", &self.map.len())
            .field("default", &self.default)
            .field("documents", &self.documents)
            .finish()
    }
}

/// Estimates smoothed word log-probabilities for the documents of one category.
///
/// A word contained in `c` of the `n` documents gets `ln(c + 1) - ln(n + 2)`.
pub fn estimate<T: Tokenizer + ?Sized>(
    documents: &[Document],
    tokenizer: &T,
) -> Result<LogProbabilityTable> {
    let counts = count_documents(documents, tokenizer)?;
    LogProbabilityTable::from_counts(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WhitespaceTokenizer;
    use pretty_assertions::assert_eq;

    fn table(texts: &[&str]) -> LogProbabilityTable {
        let documents: Vec<_> = texts.iter().map(|text| Document::text(*text)).collect();
        estimate(&documents, &WhitespaceTokenizer).unwrap()
    }

    #[test]
    fn test_laplace_estimate() {
        let table = table(&["buy now", "buy free"]);

        assert_eq!(table.get("buy"), 3f64.ln() - 4f64.ln());
        assert_eq!(table.get("now"), 2f64.ln() - 4f64.ln());
        assert_eq!(table.len(), 3);
        assert_eq!(table.documents(), 2);
    }

    #[test]
    fn test_default_for_unseen_word() {
        let table = table(&["buy now", "buy free"]);

        assert!(!table.contains("meeting"));
        assert_eq!(table.get("meeting"), -(4f64.ln()));
        assert_eq!(table.default_log_probability(), -(4f64.ln()));
    }

    #[test]
    fn test_all_values_strictly_negative() {
        let table = table(&["a b c", "a b", "a", "a c d e"]);

        for (word, value) in table.entries() {
            assert!(value < 0.0, "{word} has non-negative log-probability {value}");
        }
        assert!(table.get("never-seen") < 0.0);
    }

    #[test]
    fn test_word_in_every_document_stays_below_one() {
        let table = table(&["x", "x", "x", "x", "x", "x", "x", "x"]);
        // (8 + 1) / (8 + 2)
        assert!((table.get("x") - 0.9f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_category_defaults_to_half() {
        let table = table(&[]);
        assert!(table.is_empty());
        assert_eq!(table.get("anything"), -(2f64.ln()));
    }

    #[test]
    fn test_entries_sorted() {
        let table = table(&["pear apple fig"]);
        let words: Vec<_> = table.entries().into_iter().map(|(word, _)| word).collect();
        assert_eq!(words, vec!["apple", "fig", "pear"]);
    }
}
