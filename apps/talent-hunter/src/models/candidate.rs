use std::path::{Path, PathBuf};

use serde::Serialize;

/// Document formats the extractor understands. Anything else in a résumé
/// folder is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Case-insensitive extension match: `CV.PDF` and `cv.pdf` are both PDFs.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

/// A résumé file found in the analysed folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateDocument {
    pub file_name: String,
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl CandidateDocument {
    /// Returns `None` for paths without a supported extension or a UTF-8 file name.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let format = DocumentFormat::from_path(&path)?;
        let file_name = path.file_name()?.to_str()?.to_string();
        Some(Self {
            file_name,
            path,
            format,
        })
    }
}

/// A candidate that produced text and was scored against the job profile.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub document: CandidateDocument,
    pub keyword_matches: u32,
    pub similarity: f32,
}

/// Why a document never reached the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    Unreadable(String),
    NoText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDocument {
    pub file_name: String,
    pub reason: SkipReason,
}
