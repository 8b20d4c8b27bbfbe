// Text extraction for résumé documents.
// Every failure here is recoverable: the ranker logs it and skips the file.

pub mod docx;
pub mod pdf;

use thiserror::Error;

use crate::models::candidate::{CandidateDocument, DocumentFormat};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("DOCX extraction error: {0}")]
    Docx(String),
}

/// Reads a candidate document and returns its plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &CandidateDocument) -> Result<String, ExtractionError>;
}

/// Dispatches on the document format to the PDF or DOCX reader.
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, document: &CandidateDocument) -> Result<String, ExtractionError> {
        let text = match document.format {
            DocumentFormat::Pdf => pdf::extract_pdf_text(&document.path)?,
            DocumentFormat::Docx => docx::extract_docx_text(&document.path)?,
        };
        Ok(text.trim().to_string())
    }
}
