use std::fmt;

use rayon::prelude::*;
use tracing::info;

use crate::classifier::{classify, Prediction};
use crate::document::Document;
use crate::learner::LearnedModel;
use crate::tokenizer::Tokenizer;

/// Counts of true category (rows) against predicted category (columns).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: [[u32; 2]; 2],
    skipped: u32,
}

impl ConfusionMatrix {
    pub fn record(&mut self, truth: usize, predicted: usize) {
        self.counts[truth][predicted] += 1;
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u32 {
        self.counts[truth][predicted]
    }

    /// Correctly classified documents of `category`.
    pub fn correct(&self, category: usize) -> u32 {
        self.counts[category][category]
    }

    /// Evaluated documents whose true category is `category`.
    pub fn total(&self, category: usize) -> u32 {
        self.counts[category].iter().sum()
    }

    /// Documents left out because they could not be decoded.
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total(0) + self.total(1);
        if total == 0 {
            return 0.0;
        }
        (self.correct(0) + self.correct(1)) as f64 / total as f64
    }

    pub fn summary<'a>(&'a self, labels: [&'a str; 2]) -> Summary<'a> {
        Summary {
            matrix: self,
            labels,
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for truth in 0..2 {
            for predicted in 0..2 {
                self.counts[truth][predicted] += other.counts[truth][predicted];
            }
        }
        self.skipped += other.skipped;
        self
    }
}

/// Summary sentence, e.g. "... correctly classified 9 out of 10 spam messages ...".
pub struct Summary<'a> {
    matrix: &'a ConfusionMatrix,
    labels: [&'a str; 2],
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The model has correctly classified {} out of {} {} messages, and {} out of {} {} messages.",
            self.matrix.correct(0),
            self.matrix.total(0),
            self.labels[0],
            self.matrix.correct(1),
            self.matrix.total(1),
            self.labels[1],
        )
    }
}

/// True category of a test document from its file name: names containing the
/// category 1 label belong to category 1, everything else to category 0.
pub fn true_category<L: AsRef<str>>(document: &Document, labels: &[L; 2]) -> usize {
    match document.file_name() {
        Some(name) if name.contains(labels[1].as_ref()) => 1,
        _ => 0,
    }
}

/// Classifies every document in parallel and tallies the results.
/// Undecodable documents are counted as skipped only.
pub fn evaluate<T: Tokenizer + ?Sized, L: AsRef<str> + Sync>(
    documents: &[Document],
    model: &LearnedModel,
    labels: &[L; 2],
    tokenizer: &T,
) -> ConfusionMatrix {
    let matrix = documents
        .par_iter()
        .map(|document| {
            let mut matrix = ConfusionMatrix::default();
            match classify(document, model, labels, tokenizer) {
                Prediction::Category { index, .. } => {
                    matrix.record(true_category(document, labels), index)
                }
                Prediction::Undecodable => matrix.skipped += 1,
            }
            matrix
        })
        .reduce(ConfusionMatrix::default, ConfusionMatrix::merge);

    info!(
        evaluated = matrix.total(0) + matrix.total(1),
        skipped = matrix.skipped,
        accuracy = matrix.accuracy(),
        "evaluation finished"
    );

    matrix
}
