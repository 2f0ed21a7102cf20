use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading documents, training or configuring the classifier.
#[derive(Error, Debug)]
pub enum Error {
    /// A document or folder could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document bytes could not be interpreted as text.
    #[error("document {document} cannot be decoded")]
    Decode { document: String },

    /// At least one category has no training documents.
    #[error("degenerate training set: category 0 has {} documents, category 1 has {}", .counts[0], .counts[1])]
    DegenerateTrainingSet { counts: [usize; 2] },

    /// A smoothed log-probability came out non-negative.
    #[error("log-probability {log_probability} for word {word:?} is not strictly negative")]
    InvariantViolation { word: String, log_probability: f64 },

    #[error("model error: {0}")]
    Model(#[from] fst::Error),

    #[error("invalid settings: {0}")]
    Config(#[from] serde_json::Error),

    #[cfg(feature = "csv")]
    #[error("dataset error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is a per-document condition a batch run can skip.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
