//! Display-ready projections of a comparison.
//!
//! Every view is computed from the same edit script and line pairs, so the
//! three modes always agree on what was removed and what was added. None of
//! them re-runs the line diff; the word diff is only run per pair.

use derive_more::Display;
use std::str::FromStr;

use crate::edit_script::{EditScript, SegmentKind};
use crate::line_pair::LinePair;
use crate::options::CompareOptions;
use crate::word_diff::{diff_words_with, WordSegment};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a comparison is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ViewMode {
    /// Old and new lines in two aligned columns
    #[default]
    #[display(fmt = "side-by-side")]
    SideBySide,

    /// The edit script as tagged blocks
    #[display(fmt = "unified")]
    Unified,

    /// One line per pair with removals and additions interleaved
    #[display(fmt = "inline-merged")]
    InlineMerged,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::SideBySide, ViewMode::Unified, ViewMode::InlineMerged];
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.to_string() == s)
            .ok_or_else(|| format!("unknown view mode: {s}"))
    }
}

/// One row of the side-by-side view
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SideBySideRow {
    /// Equal and removed fragments of the old line
    pub old: Vec<WordSegment>,

    /// Equal and added fragments of the new line
    pub new: Vec<WordSegment>,

    pub unchanged: bool,
}

/// One block of the unified view
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnifiedBlock {
    pub kind: SegmentKind,
    pub lines: Vec<String>,
}

/// One line of the inline-merged view
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InlineLine {
    pub fragments: Vec<WordSegment>,
}

/// A projection of a comparison for one view mode
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", content = "rows", rename_all = "kebab-case"))]
pub enum DisplayModel {
    SideBySide(Vec<SideBySideRow>),
    Unified(Vec<UnifiedBlock>),
    InlineMerged(Vec<InlineLine>),
}

impl DisplayModel {
    /// The mode this model was projected for
    pub fn mode(&self) -> ViewMode {
        match self {
            DisplayModel::SideBySide(_) => ViewMode::SideBySide,
            DisplayModel::Unified(_) => ViewMode::Unified,
            DisplayModel::InlineMerged(_) => ViewMode::InlineMerged,
        }
    }

    /// Number of rows, blocks or lines
    pub fn len(&self) -> usize {
        match self {
            DisplayModel::SideBySide(rows) => rows.len(),
            DisplayModel::Unified(blocks) => blocks.len(),
            DisplayModel::InlineMerged(lines) => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Project a comparison into the layout of `mode`
pub fn project(
    script: &EditScript,
    pairs: &[LinePair],
    mode: ViewMode,
    options: &CompareOptions,
) -> DisplayModel {
    match mode {
        ViewMode::SideBySide => DisplayModel::SideBySide(
            pairs.iter().map(|pair| side_by_side_row(pair, options)).collect(),
        ),
        ViewMode::Unified => DisplayModel::Unified(
            script
                .segments()
                .iter()
                .map(|segment| UnifiedBlock {
                    kind: segment.kind,
                    lines: segment.lines.clone(),
                })
                .collect(),
        ),
        ViewMode::InlineMerged => DisplayModel::InlineMerged(
            pairs
                .iter()
                .map(|pair| InlineLine {
                    fragments: diff_words_with(&pair.old_text, &pair.new_text, options),
                })
                .collect(),
        ),
    }
}

fn side_by_side_row(pair: &LinePair, options: &CompareOptions) -> SideBySideRow {
    if pair.unchanged {
        return SideBySideRow {
            old: verbatim(&pair.old_text),
            new: verbatim(&pair.new_text),
            unchanged: true,
        };
    }

    let (old, new): (Vec<_>, Vec<_>) = diff_words_with(&pair.old_text, &pair.new_text, options)
        .into_iter()
        .fold((Vec::new(), Vec::new()), |(mut old, mut new), fragment| {
            if fragment.in_old() {
                old.push(fragment.clone());
            }
            if fragment.in_new() {
                new.push(fragment);
            }
            (old, new)
        });

    SideBySideRow {
        old,
        new,
        unchanged: false,
    }
}

fn verbatim(line: &str) -> Vec<WordSegment> {
    if line.is_empty() {
        Vec::new()
    } else {
        vec![WordSegment::equal(line)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_diff::WordKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_view_mode_round_trips_through_display() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.to_string().parse::<ViewMode>(), Ok(mode));
        }
        assert!("split".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_side_by_side_splits_fragments_per_side() {
        let row = side_by_side_row(&LinePair::modified("cat sat", "cat ran"), &CompareOptions::default());
        assert_eq!(
            row.old,
            vec![WordSegment::equal("cat "), WordSegment::new(WordKind::Removed, "sat")]
        );
        assert_eq!(
            row.new,
            vec![WordSegment::equal("cat "), WordSegment::new(WordKind::Added, "ran")]
        );
    }

    #[test]
    fn test_side_by_side_pure_addition_has_empty_old_side() {
        let row = side_by_side_row(&LinePair::added("fresh"), &CompareOptions::default());
        assert!(row.old.is_empty());
        assert_eq!(row.new, vec![WordSegment::new(WordKind::Added, "fresh")]);
    }
}
