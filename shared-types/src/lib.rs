pub mod document;
pub mod extraction;
pub mod report;

pub use document::{Document, DocumentFormat};
pub use extraction::{ExtractionError, PipelineOutcome, TextExtractor};
pub use report::{Report, ReportRow, REPORT_FILE_NAME, REPORT_HEADER, REPORT_MEDIA_TYPE};
