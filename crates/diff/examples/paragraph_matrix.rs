use compara_diff::{paragraph_matrix, Text, WordKind};

fn main() {
    let old = Text::new("Contract between the parties.\n\nPayment is due in 30 days.\nSigned in Lisbon.");
    let new = Text::new("Contract between the parties.\n\nPayment is due in 45 days.\nSigned in Porto.");

    for (i, pair) in paragraph_matrix(&old, &new).iter().enumerate() {
        let diff = pair.word_diff();
        println!("Paragraph {}", i + 1);

        print!("  old: ");
        for fragment in &diff.left {
            match fragment.kind {
                WordKind::Removed => print!("\x1b[31m{}\x1b[0m", fragment.text),
                _ => print!("{}", fragment.text),
            }
        }
        println!();

        print!("  new: ");
        for fragment in &diff.right {
            match fragment.kind {
                WordKind::Added => print!("\x1b[32m{}\x1b[0m", fragment.text),
                _ => print!("{}", fragment.text),
            }
        }
        println!();
    }
}
