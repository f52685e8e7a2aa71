//! Terminal rendering of comparisons

use compara_diff::{DisplayModel, ParagraphDiff, SegmentKind, Statistics, WordKind, WordSegment};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const STRIKE: &str = "\x1b[9m";
const UNDERLINE: &str = "\x1b[4m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Widest the old column of the side-by-side view may grow
const MAX_COLUMN_WIDTH: usize = 60;

pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, out: &mut String, style: &str, text: &str) {
        if self.color {
            let _ = write!(out, "{style}{text}{RESET}");
        } else {
            out.push_str(text);
        }
    }

    fn fragment(&self, out: &mut String, fragment: &WordSegment, inline: bool) {
        match fragment.kind {
            WordKind::Equal => out.push_str(&fragment.text),
            WordKind::Removed if self.color => {
                self.paint(out, &format!("{RED}{STRIKE}"), &fragment.text)
            }
            WordKind::Removed => {
                let _ = write!(out, "[-{}-]", fragment.text);
            }
            WordKind::Added if self.color && inline => {
                self.paint(out, &format!("{GREEN}{UNDERLINE}"), &fragment.text)
            }
            WordKind::Added if self.color => self.paint(out, GREEN, &fragment.text),
            WordKind::Added => {
                let _ = write!(out, "{{+{}+}}", fragment.text);
            }
        }
    }

    fn fragments(&self, fragments: &[WordSegment], inline: bool) -> String {
        let mut out = String::new();
        for fragment in fragments {
            self.fragment(&mut out, fragment, inline);
        }
        out
    }

    /// Terminal columns taken by the fragments; escape codes take none, markers do
    fn visible_width(&self, fragments: &[WordSegment]) -> usize {
        fragments
            .iter()
            .map(|f| match f.kind {
                WordKind::Removed | WordKind::Added if !self.color => f.text.width() + 4,
                _ => f.text.width(),
            })
            .sum()
    }

    /// The statistics panel shown above every view
    pub fn statistics(&self, stats: &Statistics) -> String {
        let mut out = String::new();
        self.paint(&mut out, BOLD, &format!("Similarity: {}%", stats.similarity_percent));
        out.push_str("  ");
        self.paint(&mut out, GREEN, &format!("Additions: {}", stats.added_lines));
        out.push_str("  ");
        self.paint(&mut out, RED, &format!("Deletions: {}", stats.removed_lines));
        let _ = writeln!(out, "  Total changes: {}", stats.total_changes);
        out
    }

    pub fn view(&self, model: &DisplayModel) -> String {
        let mut out = String::new();
        match model {
            DisplayModel::SideBySide(rows) => {
                let width = rows
                    .iter()
                    .map(|row| self.visible_width(&row.old))
                    .max()
                    .unwrap_or(0)
                    .clamp("Original".len(), MAX_COLUMN_WIDTH);

                let _ = writeln!(out, "{:<width$} | Modified", "Original");
                let _ = writeln!(out, "{:-<width$}-+-{:-<8}", "", "");
                for row in rows {
                    let padding = width.saturating_sub(self.visible_width(&row.old));
                    out.push_str(&self.fragments(&row.old, false));
                    out.push_str(&" ".repeat(padding));
                    out.push_str(" | ");
                    out.push_str(&self.fragments(&row.new, false));
                    out.push('\n');
                }
            }
            DisplayModel::Unified(blocks) => {
                for block in blocks {
                    for line in &block.lines {
                        match block.kind {
                            SegmentKind::Equal => {
                                let _ = writeln!(out, " {line}");
                            }
                            SegmentKind::Deleted => {
                                self.paint(&mut out, RED, &format!("-{line}"));
                                out.push('\n');
                            }
                            SegmentKind::Inserted => {
                                self.paint(&mut out, GREEN, &format!("+{line}"));
                                out.push('\n');
                            }
                        }
                    }
                }
            }
            DisplayModel::InlineMerged(lines) => {
                for line in lines {
                    out.push_str(&self.fragments(&line.fragments, true));
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Paragraph-by-paragraph comparison, one block per paragraph
    pub fn paragraphs(&self, diffs: &[ParagraphDiff]) -> String {
        let mut out = String::new();
        for (i, diff) in diffs.iter().enumerate() {
            self.paint(&mut out, BOLD, &format!("Paragraph {}", i + 1));
            out.push('\n');
            let _ = writeln!(out, "  original: {}", self.fragments(&diff.left, false));
            let _ = writeln!(out, "  modified: {}", self.fragments(&diff.right, false));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compara_diff::{Comparison, CompareOptions, Text, ViewMode};
    use pretty_assertions::assert_eq;

    fn model(mode: ViewMode) -> DisplayModel {
        Comparison::new(
            &Text::new("hello\nworld"),
            &Text::new("hello\nplanet"),
            &CompareOptions::default(),
        )
        .project(mode)
    }

    #[test]
    fn test_plain_side_by_side() {
        let out = Painter::new(false).view(&model(ViewMode::SideBySide));
        assert_eq!(
            out,
            "Original  | Modified\n\
             ----------+---------\n\
             hello     | hello\n\
             [-world-] | {+planet+}\n"
        );
    }

    #[test]
    fn test_wide_characters_keep_the_column_aligned() {
        let model = Comparison::new(
            &Text::new("漢字漢字漢字
ab"),
            &Text::new("漢字漢字漢字
ac"),
            &CompareOptions::default(),
        )
        .project(ViewMode::SideBySide);
        let out = Painter::new(false).view(&model);
        assert_eq!(
            out,
            "Original     | Modified\n\
             -------------+---------\n\
             漢字漢字漢字 | 漢字漢字漢字\n\
             [-ab-]       | {+ac+}\n"
        );
    }

    #[test]
    fn test_plain_unified() {
        let out = Painter::new(false).view(&model(ViewMode::Unified));
        assert_eq!(out, " hello\n-world\n+planet\n");
    }

    #[test]
    fn test_colored_inline_uses_ansi() {
        let out = Painter::new(true).view(&model(ViewMode::InlineMerged));
        assert!(out.contains("\x1b[31m\x1b[9mworld\x1b[0m"));
        assert!(out.contains("\x1b[32m\x1b[4mplanet\x1b[0m"));
    }

    #[test]
    fn test_plain_statistics() {
        let stats = Statistics {
            unchanged_lines: 1,
            added_lines: 1,
            removed_lines: 1,
            total_changes: 2,
            total_lines: 3,
            similarity_percent: 50,
        };
        assert_eq!(
            Painter::new(false).statistics(&stats),
            "Similarity: 50%  Additions: 1  Deletions: 1  Total changes: 2\n"
        );
    }
}
