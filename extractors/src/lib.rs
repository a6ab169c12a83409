//! Extractors Crate
//!
//! This crate holds the CV extraction pipeline: it expands an uploaded ZIP
//! archive, finds the CV documents inside, pulls plain text out of each one,
//! matches email addresses and phone numbers in that text and writes one
//! spreadsheet row per document.
//!
//! # Architecture
//!
//! - **Types**: documents, report rows, errors and the result contract live in
//!   the `shared-types` crate
//! - **Implementations**: the pipeline stages are implemented in this crate
//!
//! # Pipeline stages
//!
//! - `ArchiveExpander`: ZIP archive into a per-run working directory
//! - `find_documents`: recursive discovery of `.pdf`, `.docx` and `.doc` files
//! - `TextExtractors`: PDF, DOCX and DOC text extraction, dispatched by format
//! - `ContactPatternExtractor`: email and phone-number patterns
//! - `ReportBuilder`: runs everything and writes `output.xlsx`
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{PipelineOptions, ReportBuilder};
//!
//! let builder = ReportBuilder::new(PipelineOptions::default());
//! let run = builder.run(Path::new("cvs.zip"));
//! println!("{}", serde_json::to_string(run.outcome())?);
//! ```

pub mod archive;
pub mod contact_patterns;
pub mod locator;
pub mod report;
pub mod text;

// Re-export commonly used types
pub use archive::ArchiveExpander;
pub use contact_patterns::{ContactDetails, ContactPatternExtractor, EmailExtractor, PhoneExtractor};
pub use locator::find_documents;
pub use report::{write_report, PipelineOptions, PipelineRun, ReportBuilder, RunStage, RunWorkspace};
pub use text::{DocConverter, DocTextExtractor, DocxTextExtractor, PdfTextExtractor, TextExtractors};

// Re-export the shared types callers need alongside the pipeline
pub use shared_types::{Document, DocumentFormat, ExtractionError, PipelineOutcome, TextExtractor};
