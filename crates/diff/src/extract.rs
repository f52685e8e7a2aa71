use derive_more::Display;
use std::path::Path;
use thiserror::Error;

use crate::text::Text;

/// Upload ceiling for a single document
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("document is not valid UTF-8 (first bad byte at offset {offset})")]
    InvalidEncoding { offset: usize },

    #[error("unsupported document type: {kind}")]
    Unsupported { kind: String },

    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Turns the bytes of a document into text.
///
/// Implementations must be shareable across threads: both documents of a
/// comparison are extracted concurrently.
pub trait TextExtractor: Sync {
    fn extract(&self, bytes: &[u8]) -> Result<Text, ExtractionError>;
}

impl<F> TextExtractor for F
where
    F: Fn(&[u8]) -> Result<Text, ExtractionError> + Sync,
{
    fn extract(&self, bytes: &[u8]) -> Result<Text, ExtractionError> {
        self(bytes)
    }
}

/// Extractor for documents that already are plain UTF-8 text
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Text, ExtractionError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = std::str::from_utf8(bytes).map_err(|e| ExtractionError::InvalidEncoding {
            offset: e.valid_up_to(),
        })?;
        Ok(Text::new(text))
    }
}

/// Document formats recognised by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DocumentKind {
    #[display(fmt = "docx")]
    Docx,

    #[display(fmt = "plain text")]
    PlainText,
}

impl DocumentKind {
    /// Detect the kind from a file name's extension, case-insensitively
    pub fn from_file_name(name: impl AsRef<Path>) -> Option<Self> {
        let ext = name.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "docx" => Some(DocumentKind::Docx),
            "txt" | "md" | "text" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

/// Check whether a file name has a recognised document extension
pub fn is_supported(name: impl AsRef<Path>) -> bool {
    DocumentKind::from_file_name(name).is_some()
}
