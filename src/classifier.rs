use std::fmt;

use fst::Streamer;
use tracing::{debug, warn};

use crate::document::{Document, WordSet};
use crate::learner::LearnedModel;
use crate::tokenizer::Tokenizer;

pub const DEFAULT_LABELS: [&str; 2] = ["spam", "ham"];

/// Outcome of classifying one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    /// The category with the highest posterior.
    Category { index: usize, label: String },
    /// The document could not be read or decoded.
    Undecodable,
}

impl Prediction {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Category { index, .. } => Some(*index),
            Self::Undecodable => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Category { label, .. } => Some(label),
            Self::Undecodable => None,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category { label, .. } => f.write_str(label),
            Self::Undecodable => f.write_str("undecodable"),
        }
    }
}

/// Detailed classification result
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// `ln P(words | category) + ln P(category)` per category.
    pub log_posteriors: [f64; 2],
    /// Posteriors normalized to sum to one.
    pub probabilities: [f64; 2],
    /// Index of the winning category; ties go to category 0.
    pub category: usize,
    pub confidence: f64,
}

/// Log-posterior of each category for a resolved word set.
///
/// Every word known to either table contributes: its log-probability when
/// present in `words`, `ln(1 - p)` when absent. Words outside both tables add
/// the same default to each category and are skipped.
pub fn log_posteriors(words: &WordSet, model: &LearnedModel) -> [f64; 2] {
    let [table0, table1] = model.tables();
    let defaults = [table0.default_log_probability(), table1.default_log_probability()];

    let mut log_likelihoods = [0.0f64; 2];
    let mut union = table0.map().op().add(table1.map()).union();
    while let Some((key, values)) = union.next() {
        let mut log_probabilities = defaults;
        for value in values {
            log_probabilities[value.index] = f64::from_bits(value.value);
        }

        let present = std::str::from_utf8(key).is_ok_and(|word| words.contains(word));
        for (total, log_probability) in log_likelihoods.iter_mut().zip(log_probabilities) {
            *total += if present {
                log_probability
            } else {
                (-log_probability.exp()).ln_1p()
            };
        }
    }

    let log_priors = model.log_priors();
    [
        log_likelihoods[0] + log_priors[0],
        log_likelihoods[1] + log_priors[1],
    ]
}

/// Index of the larger posterior, preferring category 0 on ties.
pub fn argmax(log_posteriors: [f64; 2]) -> usize {
    if log_posteriors[1] > log_posteriors[0] {
        1
    } else {
        0
    }
}

/// Scores a resolved word set against the model.
pub fn classify_words(words: &WordSet, model: &LearnedModel) -> ClassificationResult {
    let log_posteriors = log_posteriors(words, model);
    let category = argmax(log_posteriors);

    // Normalize in log-space to avoid underflow
    let max = log_posteriors[category];
    let log_evidence = max + log_posteriors.iter().map(|lp| (lp - max).exp()).sum::<f64>().ln();
    let probabilities = log_posteriors.map(|lp| (lp - log_evidence).exp());

    ClassificationResult {
        log_posteriors,
        probabilities,
        category,
        confidence: probabilities[category],
    }
}

/// Resolves and scores a document. `None` when it cannot be read or decoded.
pub fn classify_detailed<T: Tokenizer + ?Sized>(
    document: &Document,
    model: &LearnedModel,
    tokenizer: &T,
) -> Option<ClassificationResult> {
    let words = match document.words(tokenizer) {
        Ok(words) => words,
        Err(err) => {
            warn!(%document, error = %err, "skipping undecodable document");
            return None;
        }
    };

    let result = classify_words(&words, model);
    debug!(
        %document,
        words = words.len(),
        log_posteriors = ?result.log_posteriors,
        category = result.category,
        "classified document"
    );
    Some(result)
}

/// Predicts the label of `document`, or [`Prediction::Undecodable`].
pub fn classify<T: Tokenizer + ?Sized, L: AsRef<str>>(
    document: &Document,
    model: &LearnedModel,
    labels: &[L; 2],
    tokenizer: &T,
) -> Prediction {
    match classify_detailed(document, model, tokenizer) {
        Some(result) => Prediction::Category {
            index: result.category,
            label: labels[result.category].as_ref().to_owned(),
        },
        None => Prediction::Undecodable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::LogProbabilityTable;
    use crate::learner::learn;
    use crate::tokenizer::WhitespaceTokenizer;
    use crate::vocabulary::count_documents;
    use pretty_assertions::assert_eq;

    fn docs(texts: &[&str]) -> Vec<Document> {
        texts.iter().map(|text| Document::text(*text)).collect()
    }

    fn words(texts: &[&str]) -> WordSet {
        texts.iter().map(|word| word.to_string()).collect()
    }

    fn scenario_model() -> LearnedModel {
        let spam = docs(&["buy now", "buy free"]);
        let ham = docs(&["meeting notes"]);
        learn([&spam, &ham], &WhitespaceTokenizer).unwrap()
    }

    fn symmetric_model() -> LearnedModel {
        let spam = docs(&["alpha"]);
        let ham = docs(&["beta"]);
        learn([&spam, &ham], &WhitespaceTokenizer).unwrap()
    }

    #[test]
    fn test_spam_scenario() {
        let model = scenario_model();
        let prediction = classify(&Document::text("buy"), &model, &DEFAULT_LABELS, &WhitespaceTokenizer);

        assert_eq!(
            prediction,
            Prediction::Category {
                index: 0,
                label: "spam".to_string()
            }
        );
    }

    #[test]
    fn test_ham_scenario() {
        let model = scenario_model();
        let prediction = classify(
            &Document::text("meeting notes"),
            &model,
            &DEFAULT_LABELS,
            &WhitespaceTokenizer,
        );

        assert_eq!(prediction.label(), Some("ham"));
        assert_eq!(prediction.index(), Some(1));
    }

    #[test]
    fn test_log_posterior_matches_hand_computation() {
        let model = scenario_model();
        let posteriors = log_posteriors(&words(&["buy"]), &model);

        let absent = |p: f64| (1.0 - p.exp()).ln();
        // category 0: n = 2, denominator 4
        let spam = (3f64 / 4.0).ln()
            + absent((2f64 / 4.0).ln()) // now
            + absent((2f64 / 4.0).ln()) // free
            + absent((1f64 / 4.0).ln()) // meeting
            + absent((1f64 / 4.0).ln()) // notes
            + (2f64 / 3.0).ln();
        // category 1: n = 1, denominator 3
        let ham = (1f64 / 3.0).ln()
            + absent((1f64 / 3.0).ln())
            + absent((1f64 / 3.0).ln())
            + absent((2f64 / 3.0).ln())
            + absent((2f64 / 3.0).ln())
            + (1f64 / 3.0).ln();

        assert!((posteriors[0] - spam).abs() < 1e-9, "{} != {}", posteriors[0], spam);
        assert!((posteriors[1] - ham).abs() < 1e-9, "{} != {}", posteriors[1], ham);
    }

    #[test]
    fn test_unknown_words_do_not_change_prediction() {
        let model = scenario_model();
        let known = classify_words(&words(&["buy", "notes"]), &model);
        let with_unknown = classify_words(&words(&["buy", "notes", "zebra", "quartz"]), &model);

        assert_eq!(known, with_unknown);
    }

    #[test]
    fn test_tie_goes_to_category_zero() {
        let model = symmetric_model();
        let result = classify_words(&words(&[]), &model);

        assert_eq!(result.log_posteriors[0], result.log_posteriors[1]);
        assert_eq!(result.category, 0);
        assert_eq!(argmax([-1.5, -1.5]), 0);
        assert_eq!(argmax([-2.0, -1.5]), 1);
    }

    #[test]
    fn test_deterministic() {
        let model = scenario_model();
        let document = Document::text("buy meeting now");

        let first = classify(&document, &model, &DEFAULT_LABELS, &WhitespaceTokenizer);
        let second = classify(&document, &model, &DEFAULT_LABELS, &WhitespaceTokenizer);
        assert_eq!(first, second);
    }

    #[test]
    fn test_probabilities_normalized() {
        let model = scenario_model();
        let result = classify_words(&words(&["free", "notes"]), &model);

        let [p0, p1] = result.probabilities;
        assert!((p0 + p1 - 1.0).abs() < 1e-9);
        assert!(result.confidence >= 0.5 && result.confidence <= 1.0);
        assert_eq!(result.confidence, result.probabilities[result.category]);
    }

    #[test]
    fn test_undecodable_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spam7");
        std::fs::write(&path, [0xc3, 0x28, 0xa0, 0xa1]).unwrap();

        let model = scenario_model();
        let prediction = classify(&Document::path(&path), &model, &DEFAULT_LABELS, &WhitespaceTokenizer);

        assert_eq!(prediction, Prediction::Undecodable);
        assert_eq!(prediction.to_string(), "undecodable");
        assert_eq!(prediction.index(), None);
    }

    #[test]
    fn test_custom_labels() {
        let model = scenario_model();
        let labels = ["junk".to_string(), "inbox".to_string()];
        let prediction = classify(&Document::text("notes"), &model, &labels, &WhitespaceTokenizer);

        assert_eq!(prediction.to_string(), "inbox");
    }

    #[test]
    fn test_model_from_counts() {
        let spam = count_documents(&docs(&["cash", "cash prize"]), &WhitespaceTokenizer).unwrap();
        let ham = count_documents(&docs(&["lunch", "lunch plans"]), &WhitespaceTokenizer).unwrap();
        let model = LearnedModel::new(
            [
                LogProbabilityTable::from_counts(spam).unwrap(),
                LogProbabilityTable::from_counts(ham).unwrap(),
            ],
            [0.5f64.ln(), 0.5f64.ln()],
        );

        assert_eq!(classify_words(&words(&["cash"]), &model).category, 0);
        assert_eq!(classify_words(&words(&["lunch"]), &model).category, 1);
    }
}
