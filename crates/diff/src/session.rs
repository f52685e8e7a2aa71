use derive_more::Display;
use log::{debug, info, warn};
use thiserror::Error;

use crate::edit_script::{diff_lines_with, EditScript};
use crate::extract::{ExtractionError, TextExtractor};
use crate::line_pair::{pair_lines, LinePair};
use crate::options::CompareOptions;
use crate::statistics::{aggregate, Statistics};
use crate::text::Text;
use crate::view::{project, DisplayModel, ViewMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two compared documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    #[display(fmt = "old")]
    Old,

    #[display(fmt = "new")]
    New,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("no {0} document selected")]
    MissingDocument(Side),

    #[error("failed to extract {side} document: {source}")]
    Extraction {
        side: Side,
        #[source]
        source: ExtractionError,
    },

    #[error("document has {lines} lines, more than the limit of {limit}")]
    TooManyLines { lines: usize, limit: usize },
}

/// Where a session is in its extract-then-diff pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparisonState {
    #[default]
    #[display(fmt = "Idle")]
    Idle,

    #[display(fmt = "Extracting")]
    Extracting,

    #[display(fmt = "Diffing")]
    Diffing,

    #[display(fmt = "Ready")]
    Ready,
}

/// The full result of comparing two texts.
///
/// Pairs and statistics are derived once from the edit script; views are
/// projected on demand and never diff the lines again.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comparison {
    script: EditScript,
    pairs: Vec<LinePair>,
    statistics: Statistics,
    options: CompareOptions,
}

impl Comparison {
    /// Compare two texts. Never fails; the line ceiling is enforced by [`Comparison::checked`].
    pub fn new(old: &Text, new: &Text, options: &CompareOptions) -> Self {
        let script = diff_lines_with(old, new, options);
        let pairs = pair_lines(script.segments());
        let statistics = aggregate(script.segments());
        debug!(
            "Comparison ready: {} pairs, {}% similar",
            pairs.len(),
            statistics.similarity_percent
        );

        Self {
            script,
            pairs,
            statistics,
            options: options.clone(),
        }
    }

    /// Compare two texts after checking them against `options.max_lines`
    pub fn checked(old: &Text, new: &Text, options: &CompareOptions) -> Result<Self, CompareError> {
        if let Some(limit) = options.max_lines {
            let lines = old.len().max(new.len());
            if lines > limit {
                warn!("Refusing to diff {} lines (limit {})", lines, limit);
                return Err(CompareError::TooManyLines { lines, limit });
            }
        }
        Ok(Self::new(old, new, options))
    }

    pub fn script(&self) -> &EditScript {
        &self.script
    }

    pub fn pairs(&self) -> &[LinePair] {
        &self.pairs
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Lay the comparison out for `mode`
    pub fn project(&self, mode: ViewMode) -> DisplayModel {
        project(&self.script, &self.pairs, mode, &self.options)
    }
}

/// A document picked by the user, not yet extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Caller-owned state of one comparison screen: the two documents, the
/// chosen view mode and options, and the last result.
#[derive(Debug, Default)]
pub struct ComparisonSession {
    old: Option<Document>,
    new: Option<Document>,
    view_mode: ViewMode,
    options: CompareOptions,
    state: ComparisonState,
    comparison: Option<Comparison>,
}

impl ComparisonSession {
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn set_old(&mut self, document: Document) {
        self.old = Some(document);
        self.invalidate();
    }

    pub fn set_new(&mut self, document: Document) {
        self.new = Some(document);
        self.invalidate();
    }

    pub fn set_options(&mut self, options: CompareOptions) {
        self.options = options;
        self.invalidate();
    }

    /// Changing the view keeps the current result
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Forget both documents and the result
    pub fn clear(&mut self) {
        self.old = None;
        self.new = None;
        self.invalidate();
    }

    pub fn old(&self) -> Option<&Document> {
        self.old.as_ref()
    }

    pub fn new_document(&self) -> Option<&Document> {
        self.new.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    pub fn state(&self) -> ComparisonState {
        self.state
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        self.comparison.as_ref()
    }

    /// Extract both documents concurrently, then compare them.
    ///
    /// On any failure the session goes back to idle with no result.
    pub fn run<E: TextExtractor>(&mut self, extractor: &E) -> Result<&Comparison, CompareError> {
        self.invalidate();
        let old = self.old.as_ref().ok_or(CompareError::MissingDocument(Side::Old))?;
        let new = self.new.as_ref().ok_or(CompareError::MissingDocument(Side::New))?;

        transition(&mut self.state, ComparisonState::Extracting);
        let (old_text, new_text) = rayon::join(
            || extractor.extract(&old.bytes),
            || extractor.extract(&new.bytes),
        );
        let extracted = old_text
            .map_err(|source| CompareError::Extraction { side: Side::Old, source })
            .and_then(|old_text| {
                new_text
                    .map(|new_text| (old_text, new_text))
                    .map_err(|source| CompareError::Extraction { side: Side::New, source })
            });
        let (old_text, new_text) = match extracted {
            Ok(texts) => texts,
            Err(e) => {
                warn!("{}", e);
                transition(&mut self.state, ComparisonState::Idle);
                return Err(e);
            }
        };

        transition(&mut self.state, ComparisonState::Diffing);
        match Comparison::checked(&old_text, &new_text, &self.options) {
            Ok(comparison) => {
                transition(&mut self.state, ComparisonState::Ready);
                Ok(self.comparison.insert(comparison))
            }
            Err(e) => {
                transition(&mut self.state, ComparisonState::Idle);
                Err(e)
            }
        }
    }

    /// Project the last result with the selected view mode
    pub fn render(&self) -> Option<DisplayModel> {
        self.comparison.as_ref().map(|c| c.project(self.view_mode))
    }

    fn invalidate(&mut self) {
        self.comparison = None;
        self.state = ComparisonState::Idle;
    }
}

fn transition(state: &mut ComparisonState, next: ComparisonState) {
    info!("Comparison state: {} -> {}", state, next);
    *state = next;
}
