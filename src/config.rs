use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::DEFAULT_LABELS;
use crate::error::{Error, Result};
use crate::tokenizer::TokenizerKind;

pub const DEFAULT_SPAM_FOLDER: &str = "data/spam";
pub const DEFAULT_HAM_FOLDER: &str = "data/ham";
pub const DEFAULT_TESTING_FOLDER: &str = "data/testing";

/// Where the corpus lives and how documents are labelled and tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub spam_folder: PathBuf,
    pub ham_folder: PathBuf,
    pub testing_folder: PathBuf,
    pub labels: [String; 2],
    pub tokenizer: TokenizerKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spam_folder: DEFAULT_SPAM_FOLDER.into(),
            ham_folder: DEFAULT_HAM_FOLDER.into(),
            testing_folder: DEFAULT_TESTING_FOLDER.into(),
            labels: DEFAULT_LABELS.map(String::from),
            tokenizer: TokenizerKind::default(),
        }
    }
}

impl Settings {
    /// Parses a flat JSON object of string values. Missing keys and values
    /// that fail to parse keep their defaults.
    pub fn from_json(value: &str) -> Result<Self> {
        let data: HashMap<String, String> = serde_json::from_str(value)?;
        let defaults = Self::default();

        let folder = |key: &str, default: PathBuf| {
            data.get(key)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };
        let label = |key: &str, default: &String| {
            data.get(key)
                .filter(|s| !s.is_empty())
                .cloned()
                .unwrap_or_else(|| default.clone())
        };

        let tokenizer = data
            .get("tokenizer")
            .and_then(|s| s.parse::<TokenizerKind>().ok())
            .unwrap_or(defaults.tokenizer);

        Ok(Self {
            spam_folder: folder("spam_folder", defaults.spam_folder.clone()),
            ham_folder: folder("ham_folder", defaults.ham_folder.clone()),
            testing_folder: folder("testing_folder", defaults.testing_folder.clone()),
            labels: [
                label("spam_label", &defaults.labels[0]),
                label("ham_label", &defaults.labels[1]),
            ],
            tokenizer,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        Self::from_json(&contents)
    }

    pub fn labels(&self) -> [&str; 2] {
        [&self.labels[0], &self.labels[1]]
    }
}
