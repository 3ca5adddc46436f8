/*!
 * PDF text extraction.
 *
 * Wraps the `lopdf` crate. Pages are read in page order; each page yields an
 * ordered list of text fragments which are joined with a space, and a
 * paragraph break is appended after every page.
 */

use log::{debug, warn};
use lopdf::Document;

use crate::errors::ExtractionError;

/// Delimiter appended after every page
pub const PAGE_BREAK: &str = "\n\n";

/// Text extracted from a document
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    /// Number of pages read
    pub page_count: usize,
    /// Full text, one paragraph per page
    pub text: String,
}

/// PDF text extractor
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of a PDF held in memory
    ///
    /// Parsing is CPU bound and runs on the blocking thread pool.
    pub async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedDocument, ExtractionError> {
        tokio::task::spawn_blocking(move || Self::extract_blocking(&bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
    }

    /// Synchronous extraction
    pub fn extract_blocking(bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let pages = Self::page_fragments(bytes)?;
        Ok(ExtractedDocument {
            page_count: pages.len(),
            text: assemble_pages(&pages),
        })
    }

    /// Text fragments of every page, in page order
    pub fn page_fragments(bytes: &[u8]) -> Result<Vec<Vec<String>>, ExtractionError> {
        let mut doc = Document::load_mem(bytes)
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            // Many "protected" PDFs only carry an owner password
            doc.decrypt("")
                .map_err(|e| ExtractionError::Parse(format!("Encrypted document: {}", e)))?;
        }

        // BTreeMap, so iteration is in page order
        let pages = doc.get_pages();
        debug!("Extracting text from {} page(s)", pages.len());

        let mut result = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            let text = doc.extract_text(&[*page_number])
                .map_err(|e| ExtractionError::Page {
                    page: *page_number,
                    message: e.to_string(),
                })?;
            let fragments = split_fragments(&text);
            if fragments.is_empty() {
                warn!("Page {} has no extractable text", page_number);
            }
            result.push(fragments);
        }

        Ok(result)
    }
}

/// Split raw page text into trimmed, non-empty fragments
pub fn split_fragments(page_text: &str) -> Vec<String> {
    page_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join page fragments into document text
///
/// Fragments of a page are joined with a single space and every page,
/// including the last one, is followed by a paragraph break.
pub fn assemble_pages(pages: &[Vec<String>]) -> String {
    let mut full_text = String::new();
    for fragments in pages {
        full_text.push_str(&fragments.join(" "));
        full_text.push_str(PAGE_BREAK);
    }
    full_text
}
