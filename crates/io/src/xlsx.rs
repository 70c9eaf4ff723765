// Excel import (calamine) and multi-sheet report export (rust_xlsxwriter)

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::time::Instant;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};

use leadsift_filter::model::{CellValue, Dataset, PartitionKind, PartitionedReport};

use crate::error::IoError;
use crate::table::build_dataset;
use crate::SheetNaming;

/// Largest row index a worksheet can hold (0-based), header included.
const MAX_ROW: usize = 1_048_575;

/// Statistics from a report export
#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    pub sheets_exported: usize,
    pub rows_exported: usize,
    pub cells_exported: usize,
    pub export_duration_ms: u128,
}

// ============================================================================
// Import
// ============================================================================

/// Import the named sheet (or the first sheet) of an Excel/ODS file.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<Dataset, IoError> {
    let workbook = open_workbook_auto(path).map_err(|e| IoError::UnreadableInput {
        path: path.to_path_buf(),
        reason: format!("failed to open spreadsheet: {e}"),
    })?;
    import_sheets(workbook, sheet, path)
}

/// Import from an in-memory upload.
pub fn import_bytes(bytes: &[u8], sheet: Option<&str>) -> Result<Dataset, IoError> {
    let source = Path::new("<upload>");
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
        IoError::UnreadableInput {
            path: source.to_path_buf(),
            reason: format!("failed to open spreadsheet: {e}"),
        }
    })?;
    import_sheets(workbook, sheet, source)
}

fn import_sheets<RS: Read + Seek>(
    mut workbook: Sheets<RS>,
    sheet: Option<&str>,
    source: &Path,
) -> Result<Dataset, IoError> {
    let sheet_names = workbook.sheet_names();
    let name = match sheet {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
        Some(name) => {
            return Err(IoError::SheetNotFound {
                name: name.to_string(),
                available: sheet_names,
            })
        }
        None => sheet_names.first().cloned().ok_or_else(|| IoError::UnreadableInput {
            path: source.to_path_buf(),
            reason: "spreadsheet contains no sheets".into(),
        })?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| IoError::UnreadableInput {
            path: source.to_path_buf(),
            reason: format!("failed to read sheet '{name}': {e}"),
        })?;

    // the range starts at the first used cell; keep blank leading columns
    let leading = range.start().map_or(0, |(_, col)| col as usize);
    let mut rows = range.rows().map(|row| {
        std::iter::repeat(CellValue::Empty)
            .take(leading)
            .chain(row.iter().map(to_cell))
            .collect::<Vec<_>>()
    });
    let header = rows.next().ok_or(IoError::EmptyInput)?;
    build_dataset(header, rows)
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::number(*n),
        Data::Int(n) => CellValue::number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // 1900 date system assumed
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64().into()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}

/// Render a 1900-system date serial as ISO 8601 (date only when whole days).
pub fn serial_to_iso(serial: f64) -> String {
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return serial.to_string();
    };
    let dt = epoch + Duration::milliseconds((serial * 86_400_000.0).round() as i64);
    if serial.fract() == 0.0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

// ============================================================================
// Export
// ============================================================================

/// Serialize the report as an xlsx workbook: five sheets in fixed order,
/// bold header row, no index column.
pub fn workbook_bytes(
    report: &PartitionedReport,
    naming: SheetNaming,
) -> Result<(Vec<u8>, ExportResult), IoError> {
    let start_time = Instant::now();
    let mut result = ExportResult::default();
    let mut xlsx_workbook = XlsxWorkbook::new();

    let formats = CellFormats::new();

    for kind in PartitionKind::ALL {
        let name = naming.sheet_name(kind);
        let worksheet = xlsx_workbook
            .add_worksheet()
            .set_name(name)
            .map_err(|e| IoError::Write(format!("failed to create sheet '{name}': {e}")))?;

        let (rows, cells) = export_partition(report, kind, worksheet, &formats)
            .map_err(|e| IoError::Write(format!("sheet '{name}': {e}")))?;
        result.rows_exported += rows;
        result.cells_exported += cells;
        result.sheets_exported += 1;
    }

    let bytes = xlsx_workbook.save_to_buffer()?;
    result.export_duration_ms = start_time.elapsed().as_millis();
    Ok((bytes, result))
}

/// Write the report to `path`. The workbook is assembled in memory and
/// renamed into place, so `path` is either complete or untouched.
pub fn export(
    report: &PartitionedReport,
    path: &Path,
    naming: SheetNaming,
) -> Result<ExportResult, IoError> {
    let (bytes, result) = workbook_bytes(report, naming)?;
    write_atomically(path, &bytes)?;
    log::info!(
        "wrote {} sheet(s), {} row(s) to {} in {}ms",
        result.sheets_exported,
        result.rows_exported,
        path.display(),
        result.export_duration_ms
    );
    Ok(result)
}

struct CellFormats {
    header: Format,
    date: Format,
    datetime: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format("yyyy-mm-dd"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
        }
    }
}

/// Returns (data rows, cells) written.
fn export_partition(
    report: &PartitionedReport,
    kind: PartitionKind,
    worksheet: &mut Worksheet,
    formats: &CellFormats,
) -> Result<(usize, usize), String> {
    let columns = report.columns();
    let mut cells = 0;

    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_num(col)?, name, &formats.header)
            .map_err(|e| e.to_string())?;
    }
    if !columns.is_empty() {
        worksheet.set_freeze_panes(1, 0).map_err(|e| e.to_string())?;
    }

    let mut rows = 0;
    for (idx, record) in report.records(kind).enumerate() {
        let row = idx + 1;
        if row > MAX_ROW {
            return Err(format!("more than {MAX_ROW} rows"));
        }
        for (col, cell) in record.cells().iter().enumerate() {
            if write_cell(worksheet, row as u32, col_num(col)?, cell, formats)? {
                cells += 1;
            }
        }
        rows += 1;
    }

    Ok((rows, cells))
}

fn col_num(col: usize) -> Result<u16, String> {
    u16::try_from(col).map_err(|_| format!("column {col} out of range"))
}

/// Returns whether a cell was written (blank cells are skipped).
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    formats: &CellFormats,
) -> Result<bool, String> {
    let written = match cell {
        CellValue::Empty => return Ok(false),
        CellValue::Text(s) => worksheet.write_string(row, col, s),
        CellValue::Number(n) => worksheet.write_number(row, col, n.0),
        CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
        CellValue::DateTime(serial) => {
            let format = if serial.0.fract() == 0.0 { &formats.date } else { &formats.datetime };
            worksheet.write_number_with_format(row, col, serial.0, format)
        }
    };
    written
        .map(|_| true)
        .map_err(|e| format!("cell ({row}, {col}): {e}"))
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), IoError> {
    let tmp = sibling(path, "tmp");
    let outcome = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = outcome {
        let _ = fs::remove_file(&tmp);
        return Err(IoError::Write(format!("{}: {e}", path.display())));
    }
    Ok(())
}

/// Hidden `.<name>.<suffix>` next to `path`, on the same filesystem so a
/// rename onto `path` is atomic.
pub(crate) fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    path.with_file_name(format!(".{name}.{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_dates_render_iso() {
        assert_eq!(serial_to_iso(45292.0), "2024-01-01");
        assert_eq!(serial_to_iso(45292.5), "2024-01-01 12:00:00");
    }

    #[test]
    fn temp_file_is_hidden_sibling() {
        assert_eq!(
            sibling(Path::new("/out/report.xlsx"), "tmp"),
            PathBuf::from("/out/.report.xlsx.tmp")
        );
        assert_eq!(
            sibling(Path::new("/out/sorted/"), "old"),
            PathBuf::from("/out/.sorted.old")
        );
    }

    #[test]
    fn calamine_cells_convert() {
        assert_eq!(to_cell(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(to_cell(&Data::Int(0)), CellValue::number(0.0));
        assert_eq!(to_cell(&Data::Float(1.5)), CellValue::number(1.5));
        assert_eq!(to_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(to_cell(&Data::String("a@x.com".into())), CellValue::text("a@x.com"));
    }
}
