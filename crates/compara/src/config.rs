//! Settings for the command line front-end
//!
//! Settings come from an optional TOML file; command line flags override them.

use anyhow::{bail, Context, Result};
use compara_diff::{
    CompareOptions, Document, DocumentKind, ExtractionError, ViewMode, MAX_DOCUMENT_BYTES,
};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Layout used when `--view` is not given
    pub view: ViewMode,

    /// Colour the terminal output
    pub color: bool,

    /// What counts as equal
    pub compare: CompareOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view: ViewMode::default(),
            color: true,
            compare: CompareOptions::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings = Self::parse(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {:?}", path);
        Ok(settings)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Read a document from disk after checking its type and size
pub fn load_document(path: &Path) -> Result<Document> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match DocumentKind::from_file_name(path) {
        Some(DocumentKind::PlainText) => {}
        Some(kind) => {
            return Err(ExtractionError::Unsupported {
                kind: kind.to_string(),
            })
            .with_context(|| format!("Cannot extract {}: convert it to plain text first", name));
        }
        None => bail!("{}: only .txt, .md and .docx documents are supported", name),
    }

    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    if size > MAX_DOCUMENT_BYTES as u64 {
        bail!(
            "{} is too large ({} bytes, max {} bytes)",
            name,
            size,
            MAX_DOCUMENT_BYTES
        );
    }

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))?;
    debug!("Read {} ({} bytes)", name, bytes.len());
    Ok(Document::new(name, bytes))
}
