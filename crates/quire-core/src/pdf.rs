//! PDF text extraction backed by the `pdf-extract` crate.
//!
//! `pdf-extract` returns the whole document as one string with form feed
//! characters (\x0C) between pages, so the page count is recovered from
//! those separators.

use anyhow::{bail, Context, Result};

/// Text and page count pulled out of one uploaded PDF.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Extract the full text of a PDF from its raw bytes.
pub fn extract(data: &[u8]) -> Result<ExtractedText> {
    let text = pdf_extract::extract_text_from_mem(data).context("Failed to parse PDF")?;

    if text.trim().is_empty() {
        bail!("PDF contains no extractable text");
    }

    let page_count = count_pages(&text);
    Ok(ExtractedText { text, page_count })
}

fn count_pages(text: &str) -> usize {
    let pages = text.split('\x0C').filter(|p| !p.trim().is_empty()).count();
    pages.max(1)
}
