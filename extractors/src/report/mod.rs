//! Report building: drives a whole pipeline run.
//!
//! A run moves through these stages:
//!
//! ```text
//! Start -> [ArchiveExpansion] -> Discovery -> DocumentProcessing -> Serialization -> Done
//!                 |                                                     |
//!                 +--------------------------> Failed <-----------------+
//! ```
//!
//! Archive expansion runs only for archive input. Document processing never
//! fails a run: a document that cannot be read becomes an empty row.

mod builder;
mod workspace;
mod xlsx;

pub use builder::{PipelineOptions, PipelineRun, ReportBuilder, RunStage};
pub use workspace::RunWorkspace;
pub use xlsx::{write_report, MAX_CELL_CHARS};
