use crate::edit_script::{EditSegment, SegmentKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Line counts and similarity of a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statistics {
    pub unchanged_lines: usize,
    pub added_lines: usize,
    pub removed_lines: usize,

    /// `added_lines + removed_lines`
    pub total_changes: usize,

    /// `unchanged_lines + added_lines + removed_lines`
    pub total_lines: usize,

    /// Share of unchanged lines, 0 to 100, with unchanged lines counted once
    /// per side: `2 * unchanged / (2 * unchanged + added + removed)`.
    /// Not derived from `total_lines`.
    pub similarity_percent: u32,
}

impl Statistics {
    /// Check if both documents had identical content
    pub fn is_identical(&self) -> bool {
        self.total_changes == 0
    }
}

/// Count the non-blank lines of every run and derive the similarity.
///
/// Unchanged lines appear in both documents, so they are weighed once per
/// side: the similarity is `2 * unchanged / (2 * unchanged + added + removed)`,
/// rounded half up. Two documents without any non-blank line are 100% similar.
pub fn aggregate(segments: &[EditSegment]) -> Statistics {
    let mut stats = Statistics::default();

    for segment in segments {
        let lines = segment
            .lines
            .iter()
            .filter(|line| !line.trim_end().is_empty())
            .count();
        match segment.kind {
            SegmentKind::Equal => stats.unchanged_lines += lines,
            SegmentKind::Inserted => stats.added_lines += lines,
            SegmentKind::Deleted => stats.removed_lines += lines,
        }
    }

    stats.total_changes = stats.added_lines + stats.removed_lines;
    stats.total_lines = stats.unchanged_lines + stats.total_changes;
    stats.similarity_percent = similarity(stats.unchanged_lines, stats.total_changes);
    stats
}

fn similarity(unchanged: usize, changes: usize) -> u32 {
    let compared = 2 * unchanged + changes;
    if compared == 0 {
        return 100;
    }
    let scaled = 200 * unchanged as u64;
    let compared = compared as u64;
    ((2 * scaled + compared) / (2 * compared)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_rounds_half_up() {
        assert_eq!(similarity(0, 0), 100);
        assert_eq!(similarity(1, 2), 50);
        assert_eq!(similarity(1, 1), 67);
        assert_eq!(similarity(0, 5), 0);
        assert_eq!(similarity(7, 0), 100);
        // 12.5
        assert_eq!(similarity(1, 14), 13);
    }
}
