use compara_diff::{diff_lines, diff_words, Comparison, CompareOptions, LinePair, Text, WordKind};

#[test]
fn test_newlines_at_end() {
    // A trailing newline does not create an extra line on either side

    let cases = [
        ("Line 1\nLine 2\n", "Line 1\nLine X\n"),
        ("Line 1\nLine 2\n", "Line 1\nLine X"),
        ("Line 1\nLine 2", "Line 1\nLine X\n"),
        ("Line 1\nLine 2", "Line 1\nLine X"),
    ];

    for (old, new) in cases {
        let comparison = Comparison::new(&Text::new(old), &Text::new(new), &CompareOptions::default());
        assert_eq!(
            comparison.pairs(),
            &[LinePair::unchanged("Line 1"), LinePair::modified("Line 2", "Line X")]
        );
    }
}

#[test]
fn test_windows_line_endings_match_unix() {
    // CRLF and LF spell the same lines
    let script = diff_lines(&Text::new("a\r\nb\r\n"), &Text::new("a\nb\n"));
    assert!(!script.has_changes());
}

#[test]
fn test_very_large_diff() {
    // Create large strings (but not too large for testing)
    let mut old = String::new();
    let mut new = String::new();

    // 1000 lines
    for i in 0..1000 {
        old.push_str(&format!("Line {} of old text\n", i));

        // Make every 10th line different
        if i % 10 == 0 {
            new.push_str(&format!("MODIFIED Line {} of new text\n", i));
        } else {
            new.push_str(&format!("Line {} of old text\n", i));
        }
    }

    let comparison = Comparison::new(&Text::new(&old), &Text::new(&new), &CompareOptions::default());
    let stats = comparison.statistics();

    assert_eq!(stats.added_lines, 100);
    assert_eq!(stats.removed_lines, 100);
    assert_eq!(stats.unchanged_lines, 900);
    assert_eq!(stats.similarity_percent, 90);
    assert_eq!(comparison.pairs().len(), 1000);
}

#[test]
fn test_unicode_text() {
    // Multi-byte characters survive both the line and the word diff
    let old = "Line 1\nLine 2 🚀\nLine 3 😊\n";
    let new = "Line 1\nLine 2 🚀\nLine 3 🎉\n";

    let comparison = Comparison::new(&Text::new(old), &Text::new(new), &CompareOptions::default());
    assert_eq!(comparison.pairs()[2], LinePair::modified("Line 3 😊", "Line 3 🎉"));

    let words = diff_words("Line 3 😊", "Line 3 🎉");
    assert_eq!(words[0].text, "Line 3 ");
    assert_eq!(words[1].kind, WordKind::Removed);
    assert_eq!(words[1].text, "😊");
    assert_eq!(words[2].kind, WordKind::Added);
    assert_eq!(words[2].text, "🎉");
}

#[test]
fn test_diff_with_only_whitespace_changes() {
    // Whitespace changes are detected unless whitespace is ignored
    let old = Text::new("Line 1\nLine 2\nLine 3\n");
    let new = Text::new("Line 1\nLine  2\nLine 3\n");

    assert!(diff_lines(&old, &new).has_changes());

    let options = CompareOptions {
        ignore_whitespace: true,
        ..Default::default()
    };
    let comparison = Comparison::new(&old, &new, &options);
    assert!(!comparison.script().has_changes());
}

#[test]
fn test_word_diff_marks_whitespace_change() {
    // An extra space is reported as a whitespace token change
    let words = diff_words("Line 2", "Line  2");
    let kinds: Vec<_> = words.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![WordKind::Equal, WordKind::Removed, WordKind::Added, WordKind::Equal]
    );
}

#[test]
fn test_everything_replaced() {
    // No common line at all gives zero similarity
    let comparison = Comparison::new(
        &Text::new("a\nb"),
        &Text::new("c\nd\ne"),
        &CompareOptions::default(),
    );

    assert_eq!(comparison.statistics().similarity_percent, 0);
    assert_eq!(
        comparison.pairs(),
        &[
            LinePair::modified("a", "c"),
            LinePair::modified("b", "d"),
            LinePair::added("e"),
        ]
    );
}
