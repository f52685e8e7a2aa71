use crate::options::CompareOptions;
use crate::text::Text;
use crate::word_diff::{diff_words_with, WordSegment};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The n-th paragraph of each document
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParagraphPair {
    pub old: String,
    pub new: String,
}

/// Word-level comparison of a paragraph pair, split per column
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParagraphDiff {
    /// Equal and removed fragments
    pub left: Vec<WordSegment>,

    /// Equal and added fragments
    pub right: Vec<WordSegment>,
}

impl ParagraphPair {
    /// Word diff of the two paragraphs with exact comparison
    pub fn word_diff(&self) -> ParagraphDiff {
        self.word_diff_with(&CompareOptions::default())
    }

    pub fn word_diff_with(&self, options: &CompareOptions) -> ParagraphDiff {
        let fragments = diff_words_with(&self.old, &self.new, options);
        ParagraphDiff {
            left: fragments.iter().filter(|f| f.in_old()).cloned().collect(),
            right: fragments.into_iter().filter(|f| f.in_new()).collect(),
        }
    }
}

/// Pair the paragraphs of two documents by position.
///
/// The shorter document is padded with empty paragraphs. Unlike the line
/// diff, no alignment is attempted: an inserted paragraph shifts every
/// following pair.
pub fn paragraph_matrix(old: &Text, new: &Text) -> Vec<ParagraphPair> {
    let old = old.paragraphs();
    let new = new.paragraphs();
    let rows = old.len().max(new.len());

    (0..rows)
        .map(|i| ParagraphPair {
            old: old.get(i).copied().unwrap_or_default().to_string(),
            new: new.get(i).copied().unwrap_or_default().to_string(),
        })
        .collect()
}
