use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::tokenizer::Tokenizer;

/// Distinct words of one document. Repeats collapse to presence.
pub type WordSet = HashSet<String>;

/// A document to train on or classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// A file read from disk on every resolution.
    Path(PathBuf),
    /// Text held in memory, e.g. a dataset row.
    Text(String),
}

impl Document {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Resolves the document into its word set.
    ///
    /// Files whose content is not valid UTF-8 fail with [`Error::Decode`].
    pub fn words<T: Tokenizer + ?Sized>(&self, tokenizer: &T) -> Result<WordSet> {
        match self {
            Self::Text(text) => Ok(tokenizer.tokenize(text).into_iter().collect()),
            Self::Path(path) => {
                let bytes = std::fs::read(path).map_err(|source| Error::io(path, source))?;
                let text = String::from_utf8(bytes).map_err(|_| Error::Decode {
                    document: path.display().to_string(),
                })?;

                Ok(tokenizer.tokenize(&text).into_iter().collect())
            }
        }
    }

    /// File name of a path document.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Path(path) => path.file_name().and_then(|name| name.to_str()),
            Self::Text(_) => None,
        }
    }
}

impl From<&Path> for Document {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Document {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Text(text) => {
                let preview: String = text.chars().take(32).collect();
                write!(f, "{preview:?}")
            }
        }
    }
}
