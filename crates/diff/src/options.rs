use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Knobs that change what counts as "equal" during a comparison.
///
/// With both normalizations off every comparison is exact and the old and
/// new texts can be rebuilt from the edit script. With either of them on,
/// equal runs carry the new document's spelling of the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompareOptions {
    /// Compare under Unicode lowercase folding
    pub ignore_case: bool,

    /// Compare lines with surrounding whitespace trimmed and inner runs collapsed
    pub ignore_whitespace: bool,

    /// Refuse to diff documents with more lines than this
    pub max_lines: Option<usize>,
}

impl CompareOptions {
    /// Check whether any normalization is active
    pub fn normalizes(&self) -> bool {
        self.ignore_case || self.ignore_whitespace
    }

    /// Comparison key for a whole line
    pub(crate) fn line_key<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let mut key = Cow::Borrowed(line);
        if self.ignore_whitespace {
            key = Cow::Owned(key.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        if self.ignore_case {
            key = Cow::Owned(key.to_lowercase());
        }
        key
    }

    /// Comparison key for a single word or whitespace token
    pub(crate) fn word_key<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if self.ignore_whitespace && token.chars().all(char::is_whitespace) {
            return Cow::Borrowed(" ");
        }
        if self.ignore_case {
            return Cow::Owned(token.to_lowercase());
        }
        Cow::Borrowed(token)
    }
}
