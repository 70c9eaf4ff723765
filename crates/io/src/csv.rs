// CSV/TSV import and per-partition export

use std::fs;
use std::path::{Path, PathBuf};

use leadsift_filter::model::{CellValue, Dataset, PartitionKind, PartitionedReport};

use crate::error::IoError;
use crate::table::build_dataset;
use crate::SheetNaming;

pub fn import(path: &Path, delimiter: Option<u8>) -> Result<Dataset, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&content));
    import_from_string(&content, delimiter).map_err(|reason| IoError::UnreadableInput {
        path: path.to_path_buf(),
        reason,
    })
}

/// Lines of input looked at when guessing the delimiter.
const SNIFF_LINES: usize = 10;

/// Guess the field delimiter of a contact export.
///
/// A candidate must split the header into at least two fields; it then
/// scores header width times the number of sample lines with that width.
/// Ties go to the later candidate, so plain commas win.
fn sniff_delimiter(content: &str) -> u8 {
    let sample = content
        .lines()
        .take(SNIFF_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    [b'|', b'\t', b';', b',']
        .into_iter()
        .filter_map(|delimiter| {
            let widths = field_counts(&sample, delimiter);
            let header = *widths.first()?;
            (header > 1).then(|| {
                let agreeing = widths.iter().filter(|&&w| w == header).count();
                (agreeing * header, delimiter)
            })
        })
        .max_by_key(|&(score, _)| score)
        .map_or(b',', |(_, delimiter)| delimiter)
}

/// Fields per record when `sample` is split on `delimiter`, quotes honored.
fn field_counts(sample: &str, delimiter: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes())
        .records()
        .map_while(Result::ok)
        .map(|record| record.len())
        .collect()
}

/// Read file and convert to UTF-8 if needed (Windows-1252 fallback for Excel-exported CSVs).
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let bytes = fs::read(path).map_err(|e| IoError::UnreadableInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

fn import_from_string(content: &str, delimiter: u8) -> Result<Dataset, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(r) => to_cells(&r.map_err(|e| e.to_string())?),
        None => return build_dataset(vec![], vec![]).map_err(|e| e.to_string()),
    };

    let rows = records
        .enumerate()
        .map(|(i, r)| {
            r.map(|r| to_cells(&r))
                .map_err(|e| format!("line {}: {e}", i + 2))
        })
        .collect::<Result<Vec<_>, _>>()?;

    build_dataset(header, rows).map_err(|e| e.to_string())
}

fn to_cells(record: &csv::StringRecord) -> Vec<CellValue> {
    record
        .iter()
        .map(|field| {
            if field.is_empty() {
                CellValue::Empty
            } else {
                CellValue::text(field)
            }
        })
        .collect()
}

/// Write each partition to `<dir>/<sheet name>.csv`, header included.
///
/// The files are written into a hidden sibling directory which then replaces
/// `dir`, so `dir` holds either the complete new report or whatever it held
/// before. An existing `dir` is only replaced when it contains nothing but
/// report files.
pub fn export_dir(
    report: &PartitionedReport,
    dir: &Path,
    naming: SheetNaming,
) -> Result<Vec<PathBuf>, IoError> {
    ensure_replaceable(dir)?;

    let staging = crate::xlsx::sibling(dir, "tmp");
    remove_stale(&staging)?;
    fs::create_dir_all(&staging)?;
    if let Err(e) = write_partitions(report, &staging, naming) {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }

    swap_into_place(&staging, dir)?;
    log::info!("wrote {} CSV file(s) to {}", PartitionKind::ALL.len(), dir.display());

    Ok(PartitionKind::ALL
        .iter()
        .map(|&kind| dir.join(file_name(naming, kind)))
        .collect())
}

fn file_name(naming: SheetNaming, kind: PartitionKind) -> String {
    format!("{}.csv", naming.sheet_name(kind))
}

fn write_partitions(
    report: &PartitionedReport,
    dir: &Path,
    naming: SheetNaming,
) -> Result<(), IoError> {
    for kind in PartitionKind::ALL {
        let mut writer = csv::Writer::from_path(dir.join(file_name(naming, kind)))?;
        writer.write_record(report.columns())?;
        for record in report.records(kind) {
            writer.write_record(record.cells().iter().map(cell_text))?;
        }
        writer.flush()?;
    }
    Ok(())
}

/// `dir` must be absent or hold only regular report files (either naming).
fn ensure_replaceable(dir: &Path) -> Result<(), IoError> {
    let meta = match fs::symlink_metadata(dir) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    if !meta.is_dir() {
        return Err(IoError::Write(format!(
            "{} exists and is not a directory",
            dir.display()
        )));
    }

    let known: Vec<String> = [SheetNaming::Snake, SheetNaming::Title]
        .into_iter()
        .flat_map(|naming| PartitionKind::ALL.map(|kind| file_name(naming, kind)))
        .collect();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let is_report_file = entry.file_type()?.is_file()
            && name.to_str().is_some_and(|n| known.iter().any(|k| k == n));
        if !is_report_file {
            return Err(IoError::Write(format!(
                "{} is not a report directory (unexpected entry '{}')",
                dir.display(),
                name.to_string_lossy()
            )));
        }
    }
    Ok(())
}

/// Leftover staging/backup from an interrupted run.
fn remove_stale(path: &Path) -> Result<(), IoError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Move `staging` to `dir`. A previous `dir` is parked next to it and
/// restored if the final rename fails.
fn swap_into_place(staging: &Path, dir: &Path) -> Result<(), IoError> {
    let write_err = |e: std::io::Error| IoError::Write(format!("{}: {e}", dir.display()));

    if !dir.exists() {
        return fs::rename(staging, dir).map_err(|e| {
            let _ = fs::remove_dir_all(staging);
            write_err(e)
        });
    }

    let backup = crate::xlsx::sibling(dir, "old");
    remove_stale(&backup)?;
    if let Err(e) = fs::rename(dir, &backup) {
        let _ = fs::remove_dir_all(staging);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(staging, dir) {
        let _ = fs::rename(&backup, dir);
        let _ = fs::remove_dir_all(staging);
        return Err(write_err(e));
    }
    if let Err(e) = fs::remove_dir_all(&backup) {
        log::warn!("could not remove {}: {e}", backup.display());
    }
    Ok(())
}

fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::DateTime(serial) => crate::xlsx::serial_to_iso(serial.0),
        other => other.display(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_picks_semicolon_export() {
        let content = "Email;Company Name;Phone\nann@acme.io;Acme;555-0100\nbo@biz.org;Biz;555-0101\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Email,Company Name\na@x.com,Acme\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Email\tCompany Name\na@x.com\tAcme\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_ignores_commas_inside_quotes() {
        let content = "Email;Office Name\nann@acme.io;\"Acme, Inc.\"\nbo@biz.org;\"Biz, LLC\"\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_prefers_consistent_width() {
        // commas appear in one row only; pipes split every row the same way
        let content = "Email|Company Name\na@x.com|Acme, Inc.\nb@x.com|Biz\n";
        assert_eq!(sniff_delimiter(content), b'|');
    }

    #[test]
    fn test_single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter("Email\na@x.com\n"), b',');
    }

    #[test]
    fn test_import_header_and_blanks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        fs::write(&path, "\u{feff}Email;Company Name\na@x.com;\nb@x.com;Acme\n").unwrap();

        let ds = import(&path, None).unwrap();
        assert_eq!(ds.columns(), &["Email", "Company Name"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0].get(1), &CellValue::Empty);
        assert_eq!(ds.rows()[1].get(1), &CellValue::text("Acme"));
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "Société" in Windows-1252
        let mut bytes = b"Email,Company Name\na@x.com,Soci".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"t\xE9\n");
        fs::write(&path, bytes).unwrap();

        let ds = import(&path, None).unwrap();
        assert_eq!(ds.rows()[0].get(1), &CellValue::text("Société"));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = import(Path::new("/nonexistent/contacts.csv"), None).unwrap_err();
        assert!(matches!(err, IoError::UnreadableInput { .. }));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        assert!(matches!(import(&path, None), Err(IoError::UnreadableInput { .. })));
    }
}
