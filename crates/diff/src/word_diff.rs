use derive_more::Display;
use log::trace;

use crate::edit_script::{runs, Run};
use crate::options::CompareOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a word-level fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WordKind {
    /// Present in both lines
    #[display(fmt = "Equal")]
    Equal,

    /// Only present in the new line
    #[display(fmt = "Added")]
    Added,

    /// Only present in the old line
    #[display(fmt = "Removed")]
    Removed,
}

/// A fragment of a line produced by a word diff
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordSegment {
    pub kind: WordKind,
    pub text: String,
}

impl WordSegment {
    pub fn new(kind: WordKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Shorthand for an unchanged fragment
    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(WordKind::Equal, text)
    }

    /// Check if this fragment is shown on the old side
    pub fn in_old(&self) -> bool {
        self.kind != WordKind::Added
    }

    /// Check if this fragment is shown on the new side
    pub fn in_new(&self) -> bool {
        self.kind != WordKind::Removed
    }
}

/// Split a line into words and the whitespace runs between them.
///
/// Concatenating the tokens gives back the line exactly.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (idx, c) in line.char_indices() {
        let ws = c.is_whitespace();
        match in_whitespace {
            Some(prev) if prev != ws => {
                tokens.push(&line[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_whitespace = Some(ws);
    }
    if start < line.len() {
        tokens.push(&line[start..]);
    }

    tokens
}

/// Diff two lines word by word with exact comparison
pub fn diff_words(old_line: &str, new_line: &str) -> Vec<WordSegment> {
    diff_words_with(old_line, new_line, &CompareOptions::default())
}

/// Diff two lines word by word.
///
/// Adjacent tokens of the same kind are joined, and within a change the
/// removed text always precedes the added text.
pub fn diff_words_with(old_line: &str, new_line: &str, options: &CompareOptions) -> Vec<WordSegment> {
    let old_tokens = tokenize(old_line);
    let new_tokens = tokenize(new_line);

    let old_keys: Vec<_> = old_tokens.iter().map(|t| options.word_key(t)).collect();
    let new_keys: Vec<_> = new_tokens.iter().map(|t| options.word_key(t)).collect();

    let mut segments = Vec::new();
    for run in runs(&old_keys, &new_keys) {
        match run {
            Run::Equal { new, .. } => {
                segments.push(WordSegment::equal(new_tokens[new].concat()));
            }
            Run::Change { old, new } => {
                if !old.is_empty() {
                    segments.push(WordSegment::new(WordKind::Removed, old_tokens[old].concat()));
                }
                if !new.is_empty() {
                    segments.push(WordSegment::new(WordKind::Added, new_tokens[new].concat()));
                }
            }
        }
    }

    trace!("Word diff produced {} fragments", segments.len());
    segments
}
