use fst::Streamer;
use tracing::info;

use crate::corpus::TrainingCorpus;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::estimator::{estimate, LogProbabilityTable};
use crate::tokenizer::Tokenizer;

/// Trained Bernoulli Naive Bayes parameters: one word table and one log-prior
/// per category. Immutable once learned.
#[derive(Debug)]
pub struct LearnedModel {
    tables: [LogProbabilityTable; 2],
    log_priors: [f64; 2],
}

impl LearnedModel {
    /// Assembles a model from already estimated parts.
    pub fn new(tables: [LogProbabilityTable; 2], log_priors: [f64; 2]) -> Self {
        Self { tables, log_priors }
    }

    pub fn tables(&self) -> &[LogProbabilityTable; 2] {
        &self.tables
    }

    pub fn table(&self, category: usize) -> &LogProbabilityTable {
        &self.tables[category]
    }

    pub fn log_priors(&self) -> [f64; 2] {
        self.log_priors
    }

    /// Prior probability of each category.
    pub fn priors(&self) -> [f64; 2] {
        self.log_priors.map(f64::exp)
    }

    /// Number of distinct words known to either category.
    pub fn vocabulary_size(&self) -> usize {
        let mut union = self.tables[0].map().op().add(self.tables[1].map()).union();
        let mut size = 0;
        while union.next().is_some() {
            size += 1;
        }
        size
    }
}

/// Learns per-category word tables and log-priors from two document lists.
///
/// Fails with [`Error::DegenerateTrainingSet`] when either list is empty.
pub fn learn<T: Tokenizer + ?Sized>(
    file_lists_by_category: [&[Document]; 2],
    tokenizer: &T,
) -> Result<LearnedModel> {
    let counts = file_lists_by_category.map(<[Document]>::len);
    if counts.contains(&0) {
        return Err(Error::DegenerateTrainingSet { counts });
    }

    let total = (counts[0] + counts[1]) as f64;
    let log_priors = counts.map(|count| (count as f64 / total).ln());

    let tables = [
        estimate(file_lists_by_category[0], tokenizer)?,
        estimate(file_lists_by_category[1], tokenizer)?,
    ];

    info!(
        documents = ?counts,
        words = ?[tables[0].len(), tables[1].len()],
        log_priors = ?log_priors,
        "learned word distributions"
    );

    Ok(LearnedModel { tables, log_priors })
}

/// Learns from a [`TrainingCorpus`].
pub fn learn_corpus<T: Tokenizer + ?Sized>(
    corpus: &TrainingCorpus,
    tokenizer: &T,
) -> Result<LearnedModel> {
    learn(corpus.categories(), tokenizer)
}
