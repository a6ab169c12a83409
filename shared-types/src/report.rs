use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Header row written at the top of every report sheet
pub const REPORT_HEADER: [&str; 3] = ["Emails", "Contact Numbers", "CV content"];

/// File name of the spreadsheet inside the working directory
pub const REPORT_FILE_NAME: &str = "output.xlsx";

/// Media type a transport layer should attach to the report download
pub const REPORT_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One report row per discovered document.
///
/// `emails` and `contact_numbers` are already comma-joined. A document whose
/// text could not be extracted still produces a row, with empty fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportRow {
    pub emails: String,
    pub contact_numbers: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl ReportRow {
    pub fn new(
        emails: &BTreeSet<String>,
        contact_numbers: &BTreeSet<String>,
        text: String,
    ) -> Self {
        Self {
            emails: join_set(emails),
            contact_numbers: join_set(contact_numbers),
            text,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Cells in header order
    pub fn cells(&self) -> [&str; 3] {
        [&self.emails, &self.contact_numbers, &self.text]
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.contact_numbers.is_empty() && self.text.is_empty()
    }
}

fn join_set(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

/// Rows in document discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> [&'static str; 3] {
        REPORT_HEADER
    }
}
