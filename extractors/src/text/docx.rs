use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use shared_types::{DocumentFormat, ExtractionError, TextExtractor};
use std::fs;
use std::path::Path;

pub struct DocxTextExtractor;

impl DocxTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for DocxTextExtractor {
    /// Body paragraphs in document order, each trimmed, joined with no separator.
    /// Tables, headers and footers are not read.
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        tracing::info!(path = %path.display(), "Reading Word document");

        let bytes = fs::read(path).map_err(|e| ExtractionError::document(path, e))?;
        let docx = read_docx(&bytes).map_err(|e| ExtractionError::document(path, e))?;

        let mut text = String::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                text.push_str(paragraph_text(paragraph).trim());
            }
        }

        Ok(text)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    collect_runs(&paragraph.children, &mut text);
    text
}

fn collect_runs(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        _ => {}
                    }
                }
            }
            // Email addresses in CVs are usually hyperlinked
            ParagraphChild::Hyperlink(link) => collect_runs(&link.children, text),
            _ => {}
        }
    }
}
