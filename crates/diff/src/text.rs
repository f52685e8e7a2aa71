use ropey::Rope;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable document body split into lines.
///
/// Lines never contain their terminator. Every Unicode line break that
/// `ropey` recognises ends a line, so text extracted from word processors
/// (which like to emit `\u{2029}` and `\r`) splits the same way as plain `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Text {
    lines: Vec<String>,
}

impl Text {
    /// Split `text` into lines
    pub fn new(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let mut lines: Vec<String> = rope
            .lines()
            .map(|line| strip_line_break(&line.to_string()).to_string())
            .collect();

        // ropey reports an empty line after a trailing break (and for empty input)
        if rope.len_chars() == 0 || rope.line(rope.len_lines() - 1).len_chars() == 0 {
            lines.pop();
        }

        Self { lines }
    }

    /// Build a text from lines that are already split
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Get the number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there are no lines at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines trimmed of surrounding whitespace, with empty ones dropped
    pub fn paragraphs(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

fn strip_line_break(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        return stripped;
    }
    match line.chars().last() {
        Some(c) if is_line_break(c) => &line[..line.len() - c.len_utf8()],
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(Text::new("").is_empty());
    }

    #[test]
    fn test_trailing_newline_does_not_add_a_line() {
        assert_eq!(Text::new("a\nb\n").lines(), &["a", "b"]);
        assert_eq!(Text::new("a\n\n").lines(), &["a", ""]);
    }

    #[test]
    fn test_mixed_line_breaks() {
        let text = Text::new("one\r\ntwo\rthree\u{2029}four");
        assert_eq!(text.lines(), &["one", "two", "three", "four"]);
    }

    #[test]
    fn test_display_joins_with_newline() {
        assert_eq!(Text::new("x\r\ny").to_string(), "x\ny");
    }

    #[test]
    fn test_paragraphs_trim_and_skip_blank() {
        let text = Text::new("  First  \n\n   \nSecond");
        assert_eq!(text.paragraphs(), vec!["First", "Second"]);
    }
}
