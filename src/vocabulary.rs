use std::collections::HashMap;

use crate::document::Document;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

/// Number of documents, within one category, that contain each word.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WordCountTable {
    counts: HashMap<String, u32>,
    documents: usize,
}

impl WordCountTable {
    /// Document count for `word`; zero when the word was never seen.
    pub fn get(&self, word: &str) -> u32 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of documents the table was built from.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// Entries sorted by word, the order an fst builder expects.
    pub fn into_sorted(self) -> Vec<(String, u32)> {
        let mut counts: Vec<_> = self.counts.into_iter().collect();
        counts.sort_by(|(left, _), (right, _)| left.cmp(right));
        counts
    }
}

/// Counts, per word, how many of `documents` contain it.
pub fn count_documents<T: Tokenizer + ?Sized>(
    documents: &[Document],
    tokenizer: &T,
) -> Result<WordCountTable> {
    let mut counts: HashMap<String, u32> = HashMap::with_capacity(256);

    for document in documents {
        for word in document.words(tokenizer)? {
            *counts.entry(word).or_default() += 1;
        }
    }

    Ok(WordCountTable {
        counts,
        documents: documents.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WhitespaceTokenizer;
    use pretty_assertions::assert_eq;

    fn docs(texts: &[&str]) -> Vec<Document> {
        texts.iter().map(|text| Document::text(*text)).collect()
    }

    #[test]
    fn test_counts_documents_not_occurrences() {
        let table = count_documents(&docs(&["buy buy buy now", "buy free"]), &WhitespaceTokenizer).unwrap();

        assert_eq!(table.get("buy"), 2);
        assert_eq!(table.get("now"), 1);
        assert_eq!(table.get("free"), 1);
        assert_eq!(table.len(), 3);
        assert_eq!(table.documents(), 2);
    }

    #[test]
    fn test_absent_word_counts_zero() {
        let table = count_documents(&docs(&["meeting notes"]), &WhitespaceTokenizer).unwrap();
        assert_eq!(table.get("viagra"), 0);
    }

    #[test]
    fn test_count_never_exceeds_documents() {
        let documents = docs(&["a b c a", "a a", "b", "c c c c", "a b"]);
        let table = count_documents(&documents, &WhitespaceTokenizer).unwrap();

        for (word, count) in table.iter() {
            assert!(
                count as usize <= documents.len(),
                "{word} counted {count} times over {} documents",
                documents.len()
            );
        }
    }

    #[test]
    fn test_empty_documents() {
        let table = count_documents(&[], &WhitespaceTokenizer).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.documents(), 0);
    }

    #[test]
    fn test_into_sorted() {
        let table = count_documents(&docs(&["zeta alpha mid"]), &WhitespaceTokenizer).unwrap();
        let words: Vec<_> = table.into_sorted().into_iter().map(|(word, _)| word).collect();
        assert_eq!(words, vec!["alpha", "mid", "zeta"]);
    }
}
