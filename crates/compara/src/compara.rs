mod config;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use compara_diff::{
    paragraph_matrix, ComparisonSession, DisplayModel, ParagraphDiff, PlainTextExtractor,
    Statistics, TextExtractor, ViewMode,
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{load_document, Settings};
use crate::render::Painter;

/// Compare two documents line by line and word by word
#[derive(Debug, Parser)]
#[command(name = "compara", version)]
struct Cli {
    /// The original document
    old: PathBuf,

    /// The modified document
    new: PathBuf,

    /// Layout: side-by-side, unified or inline-merged
    #[arg(long, short)]
    view: Option<ViewMode>,

    /// Print the statistics and the view as JSON
    #[arg(long)]
    json: bool,

    /// Treat upper and lower case as equal
    #[arg(long, short = 'i')]
    ignore_case: bool,

    /// Ignore differences in spacing
    #[arg(long, short = 'w')]
    ignore_whitespace: bool,

    /// Refuse documents with more lines than this
    #[arg(long)]
    max_lines: Option<usize>,

    /// Settings file (TOML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Compare paragraph by paragraph instead of aligning lines
    #[arg(long)]
    paragraphs: bool,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    /// Layer the flags over the loaded settings
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(view) = self.view {
            settings.view = view;
        }
        if self.ignore_case {
            settings.compare.ignore_case = true;
        }
        if self.ignore_whitespace {
            settings.compare.ignore_whitespace = true;
        }
        if self.max_lines.is_some() {
            settings.compare.max_lines = self.max_lines;
        }
        if self.no_color || self.json {
            settings.color = false;
        }
        settings
    }
}

#[derive(Serialize)]
struct Report<'a> {
    statistics: &'a Statistics,
    view: DisplayModel,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.apply(Settings::load(cli.config.as_deref())?);
    info!("Comparing {:?} with {:?} ({})", cli.old, cli.new, settings.view);

    let old = load_document(&cli.old)?;
    let new = load_document(&cli.new)?;
    let painter = Painter::new(settings.color);

    if cli.paragraphs {
        let old_text = PlainTextExtractor
            .extract(&old.bytes)
            .with_context(|| format!("Failed to extract {}", old.name))?;
        let new_text = PlainTextExtractor
            .extract(&new.bytes)
            .with_context(|| format!("Failed to extract {}", new.name))?;
        let diffs: Vec<ParagraphDiff> = paragraph_matrix(&old_text, &new_text)
            .iter()
            .map(|pair| pair.word_diff_with(&settings.compare))
            .collect();

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&diffs)?);
        } else {
            print!("{}", painter.paragraphs(&diffs));
        }
        return Ok(());
    }

    let mut session = ComparisonSession::new(settings.compare.clone());
    session.set_old(old);
    session.set_new(new);
    session.set_view_mode(settings.view);
    session.run(&PlainTextExtractor)?;

    let (Some(comparison), Some(view)) = (session.comparison(), session.render()) else {
        anyhow::bail!("comparison finished without a result");
    };

    if cli.json {
        let report = Report {
            statistics: comparison.statistics(),
            view,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", painter.statistics(comparison.statistics()));
        println!();
        print!("{}", painter.view(&view));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "compara",
            "a.txt",
            "b.txt",
            "--view",
            "unified",
            "-i",
            "--max-lines",
            "10",
            "--no-color",
        ]);
        let settings = cli.apply(Settings::default());

        assert_eq!(settings.view, ViewMode::Unified);
        assert!(settings.compare.ignore_case);
        assert!(!settings.compare.ignore_whitespace);
        assert_eq!(settings.compare.max_lines, Some(10));
        assert!(!settings.color);
    }

    #[test]
    fn test_unknown_view_is_rejected() {
        assert!(Cli::try_parse_from(["compara", "a.txt", "b.txt", "--view", "split"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
