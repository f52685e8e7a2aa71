// Core diff library for Compara
// This crate compares two extracted documents line by line, annotates changed
// lines word by word and lays the result out for the three view modes

mod edit_script;
mod extract;
mod line_pair;
mod options;
mod paragraph;
mod session;
mod statistics;
mod text;
mod view;
mod word_diff;

pub use edit_script::{diff_lines, diff_lines_with, EditScript, EditSegment, LineRange, SegmentKind};
pub use extract::{
    is_supported, DocumentKind, ExtractionError, PlainTextExtractor, TextExtractor,
    MAX_DOCUMENT_BYTES,
};
pub use line_pair::{pair_lines, LinePair};
pub use options::CompareOptions;
pub use paragraph::{paragraph_matrix, ParagraphDiff, ParagraphPair};
pub use session::{CompareError, Comparison, ComparisonSession, ComparisonState, Document, Side};
pub use statistics::{aggregate, Statistics};
pub use text::Text;
pub use view::{project, DisplayModel, InlineLine, SideBySideRow, UnifiedBlock, ViewMode};
pub use word_diff::{diff_words, diff_words_with, tokenize, WordKind, WordSegment};
