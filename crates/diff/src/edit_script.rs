use derive_more::Display;
use log::{debug, trace};
use similar::{capture_diff_slices, Algorithm, DiffTag};
use std::hash::Hash;
use std::ops::Range;

use crate::options::CompareOptions;
use crate::text::Text;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a run in an edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SegmentKind {
    /// The lines exist in both versions
    #[display(fmt = "Equal")]
    Equal,

    /// The lines only exist in the new version
    #[display(fmt = "Inserted")]
    Inserted,

    /// The lines only exist in the old version
    #[display(fmt = "Deleted")]
    Deleted,
}

/// Represents a range of lines on one side of a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineRange {
    /// The starting line (0-based)
    pub start: usize,

    /// The number of lines
    pub count: usize,
}

impl LineRange {
    /// Create a new range from start and count
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// Create a range from a start and end (exclusive)
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            count: range.end - range.start,
        }
    }

    /// Convert to a standard Range
    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Get the end of the range (exclusive)
    pub fn end(&self) -> usize {
        self.start + self.count
    }
}

/// One run of an edit script
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditSegment {
    /// What happened to the lines of this run
    pub kind: SegmentKind,

    /// The lines of this run, without terminators
    pub lines: Vec<String>,

    /// Where the run sits in the old version (empty for insertions)
    pub old_range: LineRange,

    /// Where the run sits in the new version (empty for deletions)
    pub new_range: LineRange,
}

impl EditSegment {
    /// Check if this segment is an insertion or a deletion
    pub fn is_change(&self) -> bool {
        self.kind != SegmentKind::Equal
    }

    /// The lines this segment contributes to the old version
    pub fn old_lines(&self) -> &[String] {
        match self.kind {
            SegmentKind::Inserted => &[],
            _ => &self.lines,
        }
    }

    /// The lines this segment contributes to the new version
    pub fn new_lines(&self) -> &[String] {
        match self.kind {
            SegmentKind::Deleted => &[],
            _ => &self.lines,
        }
    }
}

/// The minimal sequence of equal, inserted and deleted runs between two texts.
///
/// Between two equal runs there is at most one deleted run, always followed
/// by at most one inserted run. Pairing, statistics and every view are
/// projections of this one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditScript {
    segments: Vec<EditSegment>,
    old_line_count: usize,
    new_line_count: usize,
}

impl EditScript {
    /// Get the segments
    pub fn segments(&self) -> &[EditSegment] {
        &self.segments
    }

    /// Get the number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if there are no segments (both texts were empty)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if the script has any insertion or deletion
    pub fn has_changes(&self) -> bool {
        self.segments.iter().any(EditSegment::is_change)
    }

    /// Number of lines in the old text
    pub fn old_line_count(&self) -> usize {
        self.old_line_count
    }

    /// Number of lines in the new text
    pub fn new_line_count(&self) -> usize {
        self.new_line_count
    }

    /// The old version, rebuilt from equal and deleted runs
    pub fn old_side(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments
            .iter()
            .flat_map(|segment| segment.old_lines().iter().map(String::as_str))
    }

    /// The new version, rebuilt from equal and inserted runs
    pub fn new_side(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments
            .iter()
            .flat_map(|segment| segment.new_lines().iter().map(String::as_str))
    }
}

/// A maximal run of matching or differing items, as index ranges into both inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Run {
    Equal { old: Range<usize>, new: Range<usize> },
    Change { old: Range<usize>, new: Range<usize> },
}

/// One Myers operation in the coordinates of the full inputs
type Op = (DiffTag, Range<usize>, Range<usize>);

/// Fold operations into alternating runs.
///
/// Adjacent deletions and insertions are merged into one change run, so the
/// caller can always emit the removed side before the added side.
fn fold_runs(ops: impl IntoIterator<Item = Op>) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();

    for (tag, o, n) in ops {
        if o.is_empty() && n.is_empty() {
            continue;
        }
        let extended = match (tag, runs.last_mut()) {
            (DiffTag::Equal, Some(Run::Equal { old, new }))
            | (DiffTag::Delete | DiffTag::Insert | DiffTag::Replace, Some(Run::Change { old, new })) => {
                old.end = o.end;
                new.end = n.end;
                true
            }
            _ => false,
        };
        if !extended {
            runs.push(match tag {
                DiffTag::Equal => Run::Equal { old: o, new: n },
                _ => Run::Change { old: o, new: n },
            });
        }
    }

    runs
}

/// Shortest edit script between two slices, folded into alternating runs
pub(crate) fn runs<T: Hash + Eq + Ord>(old: &[T], new: &[T]) -> Vec<Run> {
    fold_runs(
        capture_diff_slices(Algorithm::Myers, old, new)
            .iter()
            .map(|op| op.as_tag_tuple()),
    )
}

/// A line key inside a gap between two matched content lines.
///
/// Content lines in a gap are already known to be unmatched, so each one gets
/// a key no line of the other side can equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum GapKey<'a> {
    Blank(&'a str),
    Old(usize),
    New(usize),
}

fn is_blank(line: &str) -> bool {
    line.trim_end().is_empty()
}

fn gap_key<'a>(lines: &[String], keys: &[&'a str], i: usize, side: fn(usize) -> GapKey<'a>) -> GapKey<'a> {
    if is_blank(&lines[i]) {
        GapKey::Blank(keys[i])
    } else {
        side(i)
    }
}

/// Line runs that match content lines first.
///
/// Myers runs over the non-blank lines alone, then blank lines are matched
/// inside each gap between two matched content lines. The number of unmatched
/// content lines is then the same whichever side is taken as the old one.
fn line_runs(
    old_lines: &[String],
    new_lines: &[String],
    old_keys: &[&str],
    new_keys: &[&str],
) -> Vec<Run> {
    let old_content: Vec<usize> = (0..old_lines.len())
        .filter(|&i| !is_blank(&old_lines[i]))
        .collect();
    let new_content: Vec<usize> = (0..new_lines.len())
        .filter(|&i| !is_blank(&new_lines[i]))
        .collect();
    let old_content_keys: Vec<&str> = old_content.iter().map(|&i| old_keys[i]).collect();
    let new_content_keys: Vec<&str> = new_content.iter().map(|&i| new_keys[i]).collect();

    let mut anchors: Vec<(usize, usize)> = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &old_content_keys, &new_content_keys) {
        let (tag, o, n) = op.as_tag_tuple();
        if tag == DiffTag::Equal {
            anchors.extend(o.zip(n).map(|(i, j)| (old_content[i], new_content[j])));
        }
    }
    trace!("{} content lines anchor the line diff", anchors.len());

    let mut ops: Vec<Op> = Vec::new();
    let (mut old_at, mut new_at) = (0, 0);
    for (old_anchor, new_anchor) in anchors
        .into_iter()
        .chain(std::iter::once((old_lines.len(), new_lines.len())))
    {
        let old_gap: Vec<GapKey> = (old_at..old_anchor)
            .map(|i| gap_key(old_lines, old_keys, i, GapKey::Old))
            .collect();
        let new_gap: Vec<GapKey> = (new_at..new_anchor)
            .map(|j| gap_key(new_lines, new_keys, j, GapKey::New))
            .collect();
        for op in capture_diff_slices(Algorithm::Myers, &old_gap, &new_gap) {
            let (tag, o, n) = op.as_tag_tuple();
            ops.push((tag, o.start + old_at..o.end + old_at, n.start + new_at..n.end + new_at));
        }

        if old_anchor < old_lines.len() && new_anchor < new_lines.len() {
            ops.push((DiffTag::Equal, old_anchor..old_anchor + 1, new_anchor..new_anchor + 1));
        }
        old_at = old_anchor + 1;
        new_at = new_anchor + 1;
    }

    fold_runs(ops)
}

/// Diff two texts line by line with exact comparison
pub fn diff_lines(old: &Text, new: &Text) -> EditScript {
    diff_lines_with(old, new, &CompareOptions::default())
}

/// Diff two texts line by line
pub fn diff_lines_with(old: &Text, new: &Text, options: &CompareOptions) -> EditScript {
    let old_lines = old.lines();
    let new_lines = new.lines();

    let old_keys: Vec<_> = old_lines.iter().map(|l| options.line_key(l)).collect();
    let new_keys: Vec<_> = new_lines.iter().map(|l| options.line_key(l)).collect();
    let old_keys: Vec<&str> = old_keys.iter().map(AsRef::as_ref).collect();
    let new_keys: Vec<&str> = new_keys.iter().map(AsRef::as_ref).collect();

    let mut segments = Vec::new();

    for run in line_runs(old_lines, new_lines, &old_keys, &new_keys) {
        match run {
            Run::Equal { old, new } => segments.push(EditSegment {
                kind: SegmentKind::Equal,
                lines: new_lines[new.clone()].to_vec(),
                old_range: LineRange::from_range(old),
                new_range: LineRange::from_range(new),
            }),
            Run::Change { old, new } => {
                if !old.is_empty() {
                    segments.push(EditSegment {
                        kind: SegmentKind::Deleted,
                        lines: old_lines[old.clone()].to_vec(),
                        old_range: LineRange::from_range(old.clone()),
                        new_range: LineRange::new(new.start, 0),
                    });
                }
                if !new.is_empty() {
                    segments.push(EditSegment {
                        kind: SegmentKind::Inserted,
                        lines: new_lines[new.clone()].to_vec(),
                        old_range: LineRange::new(old.end, 0),
                        new_range: LineRange::from_range(new),
                    });
                }
            }
        }
    }

    for segment in &segments {
        trace!(
            "{} run: old {:?}, new {:?}",
            segment.kind,
            segment.old_range.to_range(),
            segment.new_range.to_range()
        );
    }
    debug!(
        "Diffed {} old lines against {} new lines into {} segments",
        old_lines.len(),
        new_lines.len(),
        segments.len()
    );

    EditScript {
        segments,
        old_line_count: old_lines.len(),
        new_line_count: new_lines.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(script: &EditScript) -> Vec<SegmentKind> {
        script.segments().iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_runs_merge_adjacent_changes() {
        let runs = runs(&["a", "b", "c"], &["a", "x", "y", "c"]);
        assert_eq!(
            runs,
            vec![
                Run::Equal { old: 0..1, new: 0..1 },
                Run::Change { old: 1..2, new: 1..3 },
                Run::Equal { old: 2..3, new: 3..4 },
            ]
        );
    }

    #[test]
    fn test_deleted_comes_before_inserted() {
        let script = diff_lines(&Text::new("a\nb\nc"), &Text::new("a\nx\nc"));
        assert_eq!(
            kinds(&script),
            vec![
                SegmentKind::Equal,
                SegmentKind::Deleted,
                SegmentKind::Inserted,
                SegmentKind::Equal
            ]
        );
        assert_eq!(script.segments()[1].lines, vec!["b"]);
        assert_eq!(script.segments()[2].lines, vec!["x"]);
    }

    #[test]
    fn test_ranges_point_into_both_sides() {
        let script = diff_lines(&Text::new("a\nb"), &Text::new("a\nc\nd"));
        let deleted = &script.segments()[1];
        assert_eq!(deleted.old_range, LineRange::new(1, 1));
        assert_eq!(deleted.new_range, LineRange::new(1, 0));
        let inserted = &script.segments()[2];
        assert_eq!(inserted.new_range, LineRange::new(1, 2));
        assert_eq!(inserted.old_range, LineRange::new(2, 0));
    }

    #[test]
    fn test_ignore_case_keeps_new_spelling() {
        let options = CompareOptions {
            ignore_case: true,
            ..Default::default()
        };
        let script = diff_lines_with(&Text::new("Hello"), &Text::new("HELLO"), &options);
        assert_eq!(kinds(&script), vec![SegmentKind::Equal]);
        assert_eq!(script.segments()[0].lines, vec!["HELLO"]);
    }

    #[test]
    fn test_blank_lines_never_outrank_content() {
        let top = Text::from_lines(vec!["x".to_string(), String::new()]);
        let bottom = Text::from_lines(vec![String::new(), "x".to_string()]);
        let forward = diff_lines(&top, &bottom);
        let backward = diff_lines(&bottom, &top);

        for script in [&forward, &backward] {
            let equal: Vec<&str> = script
                .segments()
                .iter()
                .filter(|s| s.kind == SegmentKind::Equal)
                .flat_map(|s| s.lines.iter().map(String::as_str))
                .collect();
            assert_eq!(equal, vec!["x"]);
        }
        assert_eq!(forward.old_side().collect::<Vec<_>>(), vec!["x", ""]);
        assert_eq!(forward.new_side().collect::<Vec<_>>(), vec!["", "x"]);
    }

    #[test]
    fn test_blank_lines_match_between_content() {
        let script = diff_lines(&Text::new("a\n\nb"), &Text::new("a\n\nc\nb"));
        assert_eq!(
            kinds(&script),
            vec![SegmentKind::Equal, SegmentKind::Inserted, SegmentKind::Equal]
        );
        assert_eq!(script.segments()[1].lines, vec!["c"]);
    }

    #[test]
    fn test_range_methods() {
        let range = LineRange::new(10, 5);
        assert_eq!(range.end(), 15);
        assert_eq!(range.to_range(), 10..15);
        assert_eq!(LineRange::from_range(5..10), LineRange::new(5, 5));
    }
}
