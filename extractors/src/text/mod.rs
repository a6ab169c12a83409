mod doc;
mod docx;
mod pdf;

pub use doc::{DocConverter, DocTextExtractor};
pub use docx::DocxTextExtractor;
pub use pdf::PdfTextExtractor;

#[cfg(test)]
pub(crate) use docx::tests::write_docx;
#[cfg(test)]
pub(crate) use pdf::tests::write_pdf;

use shared_types::{Document, DocumentFormat, ExtractionError, TextExtractor};

/// One extractor per supported format, selected by the document's format tag
pub struct TextExtractors {
    pdf: PdfTextExtractor,
    docx: DocxTextExtractor,
    doc: DocTextExtractor,
}

impl TextExtractors {
    pub fn new(doc: DocTextExtractor) -> Self {
        Self {
            pdf: PdfTextExtractor::new(),
            docx: DocxTextExtractor::new(),
            doc,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DocTextExtractor::with_defaults())
    }

    pub fn for_format(&self, format: DocumentFormat) -> Option<&dyn TextExtractor> {
        match format {
            DocumentFormat::Pdf => Some(&self.pdf),
            DocumentFormat::Docx => Some(&self.docx),
            DocumentFormat::Doc => Some(&self.doc),
            DocumentFormat::Unsupported => None,
        }
    }

    pub fn extract(&self, document: &Document) -> Result<String, ExtractionError> {
        match self.for_format(document.format) {
            Some(extractor) => extractor.extract_text(&document.path),
            None => Err(ExtractionError::UnsupportedFormat(
                document.path.display().to_string(),
            )),
        }
    }
}

impl Default for TextExtractors {
    fn default() -> Self {
        Self::with_defaults()
    }
}
