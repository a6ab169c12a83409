use lopdf::Document as PdfDocument;
use shared_types::{DocumentFormat, ExtractionError, TextExtractor};
use std::path::Path;

pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    /// Text of every page in page order, concatenated without separators
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        tracing::info!(path = %path.display(), "Reading PDF");

        let pdf = PdfDocument::load(path).map_err(|e| ExtractionError::document(path, e))?;

        let mut text = String::new();
        // get_pages is keyed by page number, so iteration is already in page order
        for page_number in pdf.get_pages().keys() {
            let page_text = pdf
                .extract_text(&[*page_number])
                .map_err(|e| ExtractionError::document(path, format!("page {page_number}: {e}")))?;
            text.push_str(&page_text);
        }

        Ok(text)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }
}
