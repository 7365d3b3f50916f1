//! Staged Files
//!
//! Opaque file blobs waiting to be uploaded for analysis.

use std::sync::Arc;

/// Extensions the backend accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "doc"];

/// A file selected by the user. The content is shared, so clones are cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    filename: String,
    content: Arc<[u8]>,
}

impl StagedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Size in kilobytes, rounded, as shown in file listings.
    pub fn size_kb(&self) -> u64 {
        (self.size() as f64 / 1024.0).round() as u64
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Whether the backend accepts this file type.
    pub fn is_supported(&self) -> bool {
        self.extension()
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// MIME type guessed from the extension.
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some("doc") => "application/msword",
            _ => "application/octet-stream",
        }
    }
}
