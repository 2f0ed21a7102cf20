//! Binary text classification with a multivariate Bernoulli Naive Bayes model.
//!
//! Training turns two labelled document lists into Laplace-smoothed per-word
//! occurrence log-probabilities and log class-priors. Classification scores a
//! document's word set over the vocabulary known to either category and
//! returns the category with the highest log-posterior.

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod estimator;
pub mod evaluation;
pub mod learner;
pub mod tokenizer;
pub mod vocabulary;

pub use classifier::{classify, classify_detailed, ClassificationResult, Prediction, DEFAULT_LABELS};
pub use config::Settings;
pub use corpus::{files_in_folder, TrainingCorpus};
pub use document::{Document, WordSet};
pub use error::{Error, Result};
pub use estimator::{estimate, LogProbabilityTable, NUM_CATEGORIES};
pub use evaluation::{evaluate, ConfusionMatrix};
pub use learner::{learn, learn_corpus, LearnedModel};
pub use tokenizer::{SegmenterTokenizer, Tokenizer, TokenizerKind, WhitespaceTokenizer};
pub use vocabulary::{count_documents, WordCountTable};
