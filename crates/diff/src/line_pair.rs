use log::debug;

use crate::edit_script::{EditSegment, SegmentKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An old line aligned with a new line for display.
///
/// When `unchanged` is set both texts are the same. A changed pair may have
/// one empty side (a pure insertion or deletion) but never two.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinePair {
    pub old_text: String,
    pub new_text: String,
    pub unchanged: bool,
}

impl LinePair {
    /// A line present in both versions
    pub fn unchanged(line: impl Into<String>) -> Self {
        let line = line.into();
        Self {
            old_text: line.clone(),
            new_text: line,
            unchanged: true,
        }
    }

    /// An old line replaced by a new one
    pub fn modified(old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            old_text: old_text.into(),
            new_text: new_text.into(),
            unchanged: false,
        }
    }

    /// A line only present in the old version
    pub fn removed(old_text: impl Into<String>) -> Self {
        Self::modified(old_text, "")
    }

    /// A line only present in the new version
    pub fn added(new_text: impl Into<String>) -> Self {
        Self::modified("", new_text)
    }

    fn is_blank_change(&self) -> bool {
        !self.unchanged && self.old_text.is_empty() && self.new_text.is_empty()
    }
}

/// Align the runs of an edit script into line pairs.
///
/// A deleted run directly followed by an inserted run is zipped line by line
/// into modified pairs; whatever is left over on the longer side becomes pure
/// removals or additions, so no line is ever dropped. Changed pairs that
/// would be empty on both sides (a removed blank line) are skipped.
pub fn pair_lines(segments: &[EditSegment]) -> Vec<LinePair> {
    let mut pairs = Vec::new();
    let mut i = 0;

    while i < segments.len() {
        let segment = &segments[i];
        match segment.kind {
            SegmentKind::Equal => {
                pairs.extend(segment.lines.iter().map(LinePair::unchanged));
                i += 1;
            }
            SegmentKind::Deleted => match segments.get(i + 1) {
                Some(next) if next.kind == SegmentKind::Inserted => {
                    zip_run(&segment.lines, &next.lines, &mut pairs);
                    i += 2;
                }
                _ => {
                    pairs.extend(segment.lines.iter().map(LinePair::removed));
                    i += 1;
                }
            },
            SegmentKind::Inserted => {
                pairs.extend(segment.lines.iter().map(LinePair::added));
                i += 1;
            }
        }
    }

    pairs.retain(|pair| !pair.is_blank_change());
    debug!("Paired {} segments into {} line pairs", segments.len(), pairs.len());
    pairs
}

fn zip_run(deleted: &[String], inserted: &[String], pairs: &mut Vec<LinePair>) {
    let shared = deleted.len().min(inserted.len());

    pairs.extend(
        deleted[..shared]
            .iter()
            .zip(&inserted[..shared])
            .map(|(old, new)| LinePair::modified(old.as_str(), new.as_str())),
    );
    pairs.extend(deleted[shared..].iter().map(LinePair::removed));
    pairs.extend(inserted[shared..].iter().map(LinePair::added));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_script::diff_lines;
    use crate::text::Text;
    use pretty_assertions::assert_eq;

    fn pairs(old: &str, new: &str) -> Vec<LinePair> {
        pair_lines(diff_lines(&Text::new(old), &Text::new(new)).segments())
    }

    #[test]
    fn test_uneven_runs_zip_then_spill() {
        assert_eq!(
            pairs("keep\na\nb\nc\nend", "keep\nx\nend"),
            vec![
                LinePair::unchanged("keep"),
                LinePair::modified("a", "x"),
                LinePair::removed("b"),
                LinePair::removed("c"),
                LinePair::unchanged("end"),
            ]
        );
    }

    #[test]
    fn test_more_insertions_than_deletions() {
        assert_eq!(
            pairs("a", "x\ny"),
            vec![LinePair::modified("a", "x"), LinePair::added("y")]
        );
    }

    #[test]
    fn test_removed_blank_line_is_skipped() {
        assert_eq!(
            pairs("a\n\nb", "a\nb"),
            vec![LinePair::unchanged("a"), LinePair::unchanged("b")]
        );
    }

    #[test]
    fn test_unchanged_blank_line_is_kept() {
        assert_eq!(
            pairs("a\n\nb", "a\n\nc"),
            vec![
                LinePair::unchanged("a"),
                LinePair::unchanged(""),
                LinePair::modified("b", "c"),
            ]
        );
    }
}
