//! PDF text extraction.

use lopdf::Document;
use tracing::debug;

use crate::error::{AppError, Result};

/// Extracts the text of every page, in page order.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes).map_err(|e| AppError::Pdf(e.to_string()))?;

    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Ok(String::new());
    }

    let text = document
        .extract_text(&pages)
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    debug!(pages = pages.len(), chars = text.len(), "extracted PDF text");
    Ok(text)
}
