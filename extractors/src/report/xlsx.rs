use rust_xlsxwriter::Workbook;
use shared_types::{ExtractionError, Report};
use std::path::Path;

/// Excel refuses cell strings longer than this many characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Write `report` as a single sheet: header row, then one row per document.
/// Empty fields are left as blank cells.
pub fn write_report(report: &Report, path: &Path) -> Result<(), ExtractionError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, title) in report.header().iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *title)
            .map_err(|e| ExtractionError::SerializationFailure(e.to_string()))?;
    }

    for (i, row) in report.rows.iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, value) in row.cells().iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_num, col as u16, clamp_cell(value, row_num))
                .map_err(|e| ExtractionError::SerializationFailure(e.to_string()))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| ExtractionError::SerializationFailure(e.to_string()))?;

    tracing::info!(path = %path.display(), rows = report.len(), "Report written");
    Ok(())
}

fn clamp_cell(value: &str, row_num: u32) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            tracing::warn!(row = row_num, chars = MAX_CELL_CHARS, "Cell text truncated to fit Excel limit");
            &value[..cut]
        }
        None => value,
    }
}
