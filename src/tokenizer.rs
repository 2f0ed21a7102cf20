use serde::{Deserialize, Serialize};

/// Splits document text into word tokens.
///
/// Implementations only produce tokens; deduplication into a word set
/// happens when a [`crate::Document`] is resolved.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Unicode-aware tokenizer: sentence and word splitting, lowercasing and
/// stemming, keeping alphanumeric tokens only.
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmenterTokenizer;

impl Tokenizer for SegmenterTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        use unobtanium_segmenter::augmentation::{AugmentationClassify, AugmentationDetectLanguage};
        use unobtanium_segmenter::chain::{ChainAugmenter, ChainSegmenter, StartSegmentationChain};
        use unobtanium_segmenter::normalization::{NormalizationLowercase, NormalizationRustStemmers};
        use unobtanium_segmenter::segmentation::{UnicodeSentenceSplitter, UnicodeWordSplitter};
        use unobtanium_segmenter::SegmentedTokenKind;

        text.start_segmentation_chain()
            .chain_owned_segmenter(UnicodeSentenceSplitter::new())
            .chain_owned_augmenter(AugmentationDetectLanguage::new())
            .chain_owned_segmenter(UnicodeWordSplitter::new())
            .chain_owned_augmenter(AugmentationClassify::new())
            .chain_owned_augmenter(NormalizationLowercase::new())
            .chain_owned_augmenter(NormalizationRustStemmers::new())
            .filter(|token| token.kind == Some(SegmentedTokenKind::AlphaNumeric))
            .map(|token| token.get_text_prefer_normalized_owned())
            .collect()
    }
}

/// Lowercases and splits on whitespace. Punctuation stays attached to words.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_lowercase).collect()
    }
}

/// Tokenizer selection for [`crate::Settings`] and the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Segmenter,
    Whitespace,
}

impl TokenizerKind {
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            Self::Segmenter => Box::new(SegmenterTokenizer),
            Self::Whitespace => Box::new(WhitespaceTokenizer),
        }
    }
}

impl std::str::FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "segmenter" => Ok(Self::Segmenter),
            "whitespace" => Ok(Self::Whitespace),
            other => Err(format!("unknown tokenizer {other:?}")),
        }
    }
}
