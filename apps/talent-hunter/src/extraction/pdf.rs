use std::panic;
use std::path::Path;

use tracing::debug;

use crate::extraction::ExtractionError;

/// Extracts text page by page and joins the pages with `\n`. A page with no
/// text layer contributes an empty segment.
///
/// pdf-extract panics on some malformed files; the panic is caught and turned
/// into an extraction error so one bad résumé cannot end the batch.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;

    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes))
        .map_err(|payload| ExtractionError::Pdf(panic_message(payload.as_ref())))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    debug!(path = %path.display(), pages = pages.len(), "PDF text extracted");
    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("parser panicked: {detail}")
}
