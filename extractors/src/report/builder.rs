use crate::archive::ArchiveExpander;
use crate::contact_patterns::ContactPatternExtractor;
use crate::locator::find_documents;
use crate::report::workspace::RunWorkspace;
use crate::report::xlsx::write_report;
use crate::text::{DocConverter, DocTextExtractor, TextExtractors};
use shared_types::{
    Document, ExtractionError, PipelineOutcome, Report, ReportRow, REPORT_FILE_NAME,
};
use std::path::{Path, PathBuf};

/// Knobs for a pipeline run, filled from the application config
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Parent directory for per-run working directories
    pub work_root: PathBuf,
    /// Leave the run's working directory on disk when the run is dropped
    pub keep_workspace: bool,
    pub doc_converter: DocConverter,
    pub doc_converter_binary: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            work_root: std::env::temp_dir(),
            keep_workspace: false,
            doc_converter: DocConverter::default(),
            doc_converter_binary: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    ArchiveExpansion,
    Discovery,
    DocumentProcessing,
    Serialization,
}

/// Result of one run, holding on to the run's working directory.
///
/// The report file named in the outcome lives inside that directory, so it
/// must be consumed (copied, streamed) before this value is dropped.
#[derive(Debug)]
pub struct PipelineRun {
    outcome: PipelineOutcome,
    failed_at: Option<RunStage>,
    document_count: usize,
    workspace: Option<RunWorkspace>,
}

impl PipelineRun {
    fn failed(stage: RunStage, err: ExtractionError, workspace: Option<RunWorkspace>) -> Self {
        tracing::error!(stage = ?stage, "Pipeline run failed: {}", err);
        Self {
            outcome: err.into(),
            failed_at: Some(stage),
            document_count: 0,
            workspace,
        }
    }

    pub fn outcome(&self) -> &PipelineOutcome {
        &self.outcome
    }

    pub fn failed_at(&self) -> Option<RunStage> {
        self.failed_at
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn workspace_path(&self) -> Option<&Path> {
        self.workspace.as_ref().map(|w| w.path())
    }

    /// Give up the outcome and release the working directory. Unless the
    /// workspace was kept, the report file is gone once this returns.
    pub fn into_outcome(self) -> PipelineOutcome {
        self.outcome
    }
}

/// Drives archive expansion, discovery, text and contact extraction, and
/// report serialization for one input.
pub struct ReportBuilder {
    options: PipelineOptions,
    archive: ArchiveExpander,
    text: TextExtractors,
    contacts: ContactPatternExtractor,
}

impl ReportBuilder {
    pub fn new(options: PipelineOptions) -> Self {
        let doc = DocTextExtractor::new(options.doc_converter, options.doc_converter_binary.clone());
        Self {
            options,
            archive: ArchiveExpander::new(),
            text: TextExtractors::new(doc),
            contacts: ContactPatternExtractor::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(PipelineOptions::default())
    }

    /// Directories are read in place; anything else is treated as a ZIP archive
    pub fn run(&self, input: &Path) -> PipelineRun {
        if input.is_dir() {
            self.run_directory(input)
        } else {
            self.run_archive(input)
        }
    }

    pub fn run_archive(&self, archive_path: &Path) -> PipelineRun {
        let workspace = match self.create_workspace() {
            Ok(workspace) => workspace,
            Err(e) => {
                return PipelineRun::failed(RunStage::ArchiveExpansion, ExtractionError::archive(e), None)
            }
        };

        if let Err(e) = self.archive.expand(archive_path, workspace.path()) {
            return PipelineRun::failed(RunStage::ArchiveExpansion, e, Some(workspace));
        }

        let documents_dir = workspace.path().to_path_buf();
        self.finish(&documents_dir, workspace)
    }

    pub fn run_directory(&self, directory: &Path) -> PipelineRun {
        let workspace = match self.create_workspace() {
            Ok(workspace) => workspace,
            Err(e) => {
                return PipelineRun::failed(
                    RunStage::Serialization,
                    ExtractionError::SerializationFailure(format!(
                        "cannot create working directory: {e}"
                    )),
                    None,
                )
            }
        };

        self.finish(directory, workspace)
    }

    /// Discover every CV under `directory` and build one row per document
    pub fn build_report(&self, directory: &Path) -> Report {
        tracing::info!(directory = %directory.display(), "Reading CVs");

        let mut report = Report::new();
        for document in find_documents(directory) {
            report.push(self.process_document(&document));
        }
        report
    }

    /// Extract text and contact details from one document.
    ///
    /// Never fails: unreadable or unsupported documents produce an empty row.
    pub fn process_document(&self, document: &Document) -> ReportRow {
        tracing::info!(path = %document.path.display(), format = %document.format, "Processing CV");

        let text = match self.text.extract(document) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(path = %document.path.display(), "{}", e);
                String::new()
            }
        };

        let details = self.contacts.extract_from_text(&text);
        ReportRow::new(&details.emails, &details.phone_numbers, text).with_source(&document.path)
    }

    fn create_workspace(&self) -> std::io::Result<RunWorkspace> {
        let mut workspace = RunWorkspace::create(&self.options.work_root)?;
        if self.options.keep_workspace {
            workspace.keep();
        }
        Ok(workspace)
    }

    fn finish(&self, documents_dir: &Path, workspace: RunWorkspace) -> PipelineRun {
        let report = self.build_report(documents_dir);
        let document_count = report.len();

        let excel_file = workspace.path().join(REPORT_FILE_NAME);
        if let Err(e) = write_report(&report, &excel_file) {
            return PipelineRun::failed(RunStage::Serialization, e, Some(workspace));
        }

        tracing::info!(
            documents = document_count,
            excel_file = %excel_file.display(),
            "Data is extracted and saved"
        );

        PipelineRun {
            outcome: PipelineOutcome::success(excel_file),
            failed_at: None,
            document_count,
            workspace: Some(workspace),
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{write_docx, write_pdf};
    use calamine::{open_workbook, Reader, Xlsx};
    use std::fs::{self, File};
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn builder_in(root: &Path) -> ReportBuilder {
        ReportBuilder::new(PipelineOptions {
            work_root: root.to_path_buf(),
            ..PipelineOptions::default()
        })
    }

    fn zip_dir(source: &Path, archive: &Path) {
        let mut writer = zip::ZipWriter::new(File::create(archive).unwrap());
        for entry in fs::read_dir(source).unwrap() {
            let entry = entry.unwrap();
            let name = entry.file_name().to_string_lossy().into_owned();
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(&fs::read(entry.path()).unwrap()).unwrap();
        }
        writer.finish().unwrap();
    }

    /// Data rows of the written sheet, sorted, header excluded
    fn sheet_rows(path: &Path) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        let mut rows: Vec<Vec<String>> = range
            .rows()
            .skip(1)
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        rows.sort();
        rows
    }

    fn sample_archive(dir: &Path) -> PathBuf {
        let source = dir.join("source");
        fs::create_dir_all(&source).unwrap();
        write_pdf(
            &source.join("a.pdf"),
            &["Contact: jane.doe@example.com, call +1-212-555-0100"],
        );
        write_docx(&source.join("b.docx"), &["no contacts here"]);

        let archive = dir.join("cvs.zip");
        zip_dir(&source, &archive);
        archive
    }

    #[test]
    fn test_archive_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let archive = sample_archive(dir.path());
        let builder = builder_in(dir.path());

        let run = builder.run(&archive);

        assert!(run.outcome().is_success(), "{:?}", run.outcome());
        assert_eq!(run.document_count(), 2);

        let excel_file = run.outcome().excel_file().unwrap();
        assert_eq!(excel_file.file_name().unwrap(), "output.xlsx");
        assert_eq!(excel_file.parent(), run.workspace_path());

        let rows = sheet_rows(excel_file);
        assert_eq!(rows.len(), 2);

        let pdf_row = rows.iter().find(|r| r[0] == "jane.doe@example.com").unwrap();
        assert_eq!(pdf_row[1], "2125550100");
        assert!(pdf_row[2].contains("jane.doe@example.com"));

        let docx_row = rows.iter().find(|r| r[2] == "no contacts here").unwrap();
        assert_eq!(docx_row[0], "");
        assert_eq!(docx_row[1], "");
    }

    #[test]
    fn test_workspace_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let archive = sample_archive(dir.path());

        let run = builder_in(dir.path()).run(&archive);
        let workspace = run.workspace_path().unwrap().to_path_buf();
        assert!(workspace.join("output.xlsx").is_file());

        let outcome = run.into_outcome();

        assert!(outcome.is_success());
        assert!(!workspace.exists());
    }

    #[test]
    fn test_kept_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let archive = sample_archive(dir.path());
        let builder = ReportBuilder::new(PipelineOptions {
            work_root: dir.path().to_path_buf(),
            keep_workspace: true,
            ..PipelineOptions::default()
        });

        let outcome = builder.run(&archive).into_outcome();

        assert!(outcome.excel_file().unwrap().is_file());
    }

    #[test]
    fn test_invalid_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("upload.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();

        let run = builder_in(dir.path()).run(&archive);

        assert_eq!(
            run.outcome(),
            &PipelineOutcome::error("Invalid ZIP file")
        );
        assert_eq!(run.failed_at(), Some(RunStage::ArchiveExpansion));
        let workspace = run.workspace_path().unwrap();
        assert!(!workspace.join("output.xlsx").exists());
    }

    #[test]
    fn test_directory_input_with_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let cvs = dir.path().join("CV");
        fs::create_dir_all(cvs.join("team")).unwrap();
        fs::create_dir_all(cvs.join(".hidden")).unwrap();
        write_docx(&cvs.join("good.docx"), &["Reach me: sam@site.io", "+44 207 946 0958"]);
        fs::write(cvs.join("team").join("broken.pdf"), b"%PDF-garbage").unwrap();
        write_docx(&cvs.join(".hidden").join("skipped.docx"), &["x@y.com"]);

        let work_root = dir.path().join("work");
        fs::create_dir_all(&work_root).unwrap();
        let builder = builder_in(&work_root);

        let report = builder.build_report(&cvs);
        assert_eq!(report.len(), 2);

        let broken = report
            .rows
            .iter()
            .find(|r| r.source.as_deref().is_some_and(|p| p.ends_with("broken.pdf")))
            .unwrap();
        assert!(broken.is_empty());

        let good = report
            .rows
            .iter()
            .find(|r| r.source.as_deref().is_some_and(|p| p.ends_with("good.docx")))
            .unwrap();
        assert_eq!(good.emails, "sam@site.io");
        assert_eq!(good.contact_numbers, "2079460958");

        let run = builder.run(&cvs);
        assert!(run.outcome().is_success());
        assert_eq!(run.document_count(), 2);
        // the input directory is read in place, the report goes to the workspace
        assert!(!cvs.join("output.xlsx").exists());
        assert!(run.outcome().excel_file().unwrap().starts_with(&work_root));
    }

    #[test]
    fn test_unsupported_document_gives_empty_row() {
        let row = ReportBuilder::with_defaults().process_document(&Document::new("/nowhere/cv.txt"));
        assert!(row.is_empty());
        assert_eq!(row.source, Some(PathBuf::from("/nowhere/cv.txt")));
    }

    #[test]
    fn test_repeated_runs_match() {
        let dir = tempfile::tempdir().unwrap();
        let archive = sample_archive(dir.path());
        let builder = builder_in(dir.path());

        let first = builder.run(&archive);
        let second = builder.run(&archive);

        assert_ne!(first.workspace_path(), second.workspace_path());
        assert_eq!(
            sheet_rows(first.outcome().excel_file().unwrap()),
            sheet_rows(second.outcome().excel_file().unwrap())
        );
    }

    #[test]
    fn test_empty_archive_gives_header_only_report() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        fs::create_dir_all(&empty).unwrap();
        let archive = dir.path().join("empty.zip");
        zip_dir(&empty, &archive);

        let run = builder_in(dir.path()).run(&archive);

        assert!(run.outcome().is_success());
        assert_eq!(run.document_count(), 0);
        assert!(sheet_rows(run.outcome().excel_file().unwrap()).is_empty());
    }
}
