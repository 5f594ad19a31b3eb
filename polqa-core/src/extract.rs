//! The text-extraction boundary.
//!
//! Document parsing (PDF, DOCX, EML) and URL download are external
//! collaborators: the pipeline consumes a single plain-text string per
//! document. This module defines the [`TextExtractor`] contract, the
//! [`DocumentSource`] identity type, and the extension check applied
//! before any extraction is attempted.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{CoreError, Result};

/// Document formats the pipeline accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "eml"];

/// Where a document came from: a remote URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A remote document to be downloaded before extraction.
    Url(String),
    /// A document already on local disk.
    File(PathBuf),
}

impl DocumentSource {
    /// A short human-readable identity: the file name for local files,
    /// the final path segment for URLs (query string stripped).
    pub fn label(&self) -> String {
        match self {
            Self::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                let segment = path.rsplit('/').next().unwrap_or(path);
                if segment.is_empty() { "document".to_string() } else { segment.to_string() }
            }
            Self::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string()),
        }
    }

    /// The lowercase file extension, if the source has one.
    pub fn extension(&self) -> Option<String> {
        let label = self.label();
        let (stem, ext) = label.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Whether `extension` names a supported document format.
pub fn supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
}

/// Extracts plain text from a document source.
///
/// Implementations handle download, temp files, and format parsing;
/// the pipeline only ever sees the resulting string. Failures surface
/// as [`CoreError::Download`] or [`CoreError::Extraction`].
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of `source`.
    async fn extract(&self, source: &DocumentSource) -> Result<String>;
}

/// A test extractor that returns a fixed string (or a fixed failure)
/// regardless of source.
#[derive(Debug, Clone)]
pub struct StaticExtractor {
    outcome: std::result::Result<String, String>,
}

impl StaticExtractor {
    /// An extractor that always yields `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { outcome: Ok(text.into()) }
    }

    /// An extractor that always fails with a download error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()) }
    }
}

#[async_trait]
impl TextExtractor for StaticExtractor {
    async fn extract(&self, _source: &DocumentSource) -> Result<String> {
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(CoreError::Download(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_label_strips_query_string() {
        let source = DocumentSource::Url(
            "https://example.com/assets/policy.pdf?sv=2023&sig=abc".to_string(),
        );
        assert_eq!(source.label(), "policy.pdf");
        assert_eq!(source.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn url_without_extension_has_none() {
        let source = DocumentSource::Url("https://example.com/documents/latest".to_string());
        assert_eq!(source.label(), "latest");
        assert_eq!(source.extension(), None);
    }

    #[test]
    fn file_extension_is_lowercased() {
        let source = DocumentSource::File(PathBuf::from("/tmp/Policy.DOCX"));
        assert_eq!(source.extension().as_deref(), Some("docx"));
    }

    #[test]
    fn supported_formats() {
        assert!(supported_extension("pdf"));
        assert!(supported_extension("DOCX"));
        assert!(supported_extension("eml"));
        assert!(!supported_extension("txt"));
        assert!(!supported_extension(""));
    }

    #[tokio::test]
    async fn static_extractor_outcomes() {
        let source = DocumentSource::File(PathBuf::from("policy.pdf"));
        let ok = StaticExtractor::new("some policy text");
        assert_eq!(ok.extract(&source).await.unwrap(), "some policy text");

        let err = StaticExtractor::failing("connection refused");
        assert!(matches!(err.extract(&source).await, Err(CoreError::Download(_))));
    }
}
