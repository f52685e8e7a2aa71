use compara_diff::{Comparison, CompareOptions, DisplayModel, SegmentKind, Text, ViewMode, WordKind};

fn main() {
    // Two sample texts to compare
    let text1 = "This is the first line.\nHere is the second line.\nAnd the third line.";
    let text2 = "This is the first line.\nThis is a completely different second line.\nAnd the third line.\nPlus a new fourth line.";

    let comparison = Comparison::new(&Text::new(text1), &Text::new(text2), &CompareOptions::default());

    // Print diff statistics
    let stats = comparison.statistics();
    println!("Diff statistics:");
    println!("  Similarity: {}%", stats.similarity_percent);
    println!("  Added lines: {}", stats.added_lines);
    println!("  Removed lines: {}", stats.removed_lines);
    println!("  Unchanged lines: {}", stats.unchanged_lines);

    for mode in ViewMode::ALL {
        println!("\n=== {} ===", mode);
        match comparison.project(mode) {
            DisplayModel::SideBySide(rows) => {
                for row in rows {
                    let old: String = row.old.iter().map(|f| f.text.as_str()).collect();
                    let new: String = row.new.iter().map(|f| f.text.as_str()).collect();
                    println!("{:<45} | {}", old, new);
                }
            }
            DisplayModel::Unified(blocks) => {
                for block in blocks {
                    for line in &block.lines {
                        match block.kind {
                            SegmentKind::Deleted => println!("\x1b[31m-{}\x1b[0m", line),
                            SegmentKind::Inserted => println!("\x1b[32m+{}\x1b[0m", line),
                            SegmentKind::Equal => println!(" {}", line),
                        }
                    }
                }
            }
            DisplayModel::InlineMerged(lines) => {
                for line in lines {
                    for fragment in &line.fragments {
                        match fragment.kind {
                            WordKind::Removed => print!("\x1b[31m{}\x1b[0m", fragment.text),
                            WordKind::Added => print!("\x1b[32m{}\x1b[0m", fragment.text),
                            WordKind::Equal => print!("{}", fragment.text),
                        }
                    }
                    println!();
                }
            }
        }
    }
}
