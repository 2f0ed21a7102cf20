use std::path::Path;

use crate::document::Document;
use crate::error::{Error, Result};

/// Ordered training documents for both categories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrainingCorpus {
    categories: [Vec<Document>; 2],
}

impl TrainingCorpus {
    pub fn new(category0: Vec<Document>, category1: Vec<Document>) -> Self {
        Self {
            categories: [category0, category1],
        }
    }

    /// Lists both training folders.
    pub fn from_folders(category0: impl AsRef<Path>, category1: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(
            files_in_folder(category0)?,
            files_in_folder(category1)?,
        ))
    }

    pub fn categories(&self) -> [&[Document]; 2] {
        [&self.categories[0], &self.categories[1]]
    }

    pub fn push(&mut self, category: usize, document: Document) {
        self.categories[category].push(document);
    }

    pub fn len(&self) -> usize {
        self.categories[0].len() + self.categories[1].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Regular files directly inside `folder`, sorted by path.
pub fn files_in_folder(folder: impl AsRef<Path>) -> Result<Vec<Document>> {
    let folder = folder.as_ref();
    let entries = std::fs::read_dir(folder).map_err(|source| Error::io(folder, source))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::io(folder, source))?;
        let file_type = entry
            .file_type()
            .map_err(|source| Error::io(entry.path(), source))?;
        if file_type.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    Ok(paths.into_iter().map(Document::Path).collect())
}

/// Loads a `text,label` CSV dataset with a header row.
///
/// Rows labelled `labels[0]` go to category 0, rows labelled `labels[1]` to
/// category 1, anything else is skipped.
#[cfg(feature = "csv")]
pub fn from_csv<R: std::io::Read>(reader: R, labels: [&str; 2]) -> Result<TrainingCorpus> {
    const TEXT_INDEX: usize = 0;
    const LABEL_INDEX: usize = 1;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut corpus = TrainingCorpus::default();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let (Some(text), Some(label)) = (record.get(TEXT_INDEX), record.get(LABEL_INDEX)) else {
            skipped += 1;
            continue;
        };

        match labels.iter().position(|candidate| *candidate == label) {
            Some(category) => corpus.push(category, Document::text(text)),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped dataset rows without a known label");
    }

    Ok(corpus)
}
