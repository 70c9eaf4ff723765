//! Header + raw rows → `Dataset`.

use leadsift_filter::model::{CellValue, Dataset, Record};

use crate::error::IoError;

/// Build a dataset from a header row and data rows.
///
/// Blank header cells become `Unnamed: <index>`. The width is the widest of
/// the header and every row; short rows are padded with `Empty`. Rows with
/// no values at all are skipped.
pub fn build_dataset(
    header: Vec<CellValue>,
    rows: impl IntoIterator<Item = Vec<CellValue>>,
) -> Result<Dataset, IoError> {
    let rows: Vec<Vec<CellValue>> = rows
        .into_iter()
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .collect();

    let width = rows.iter().map(Vec::len).fold(header.len(), usize::max);
    if width == 0 {
        return Err(IoError::EmptyInput);
    }

    let columns = (0..width)
        .map(|i| match header.get(i).map(CellValue::display) {
            Some(name) if !name.trim().is_empty() => name,
            _ => format!("Unnamed: {i}"),
        })
        .collect();

    let records = rows
        .into_iter()
        .map(|mut cells| {
            cells.resize(width, CellValue::Empty);
            Record::new(cells)
        })
        .collect();

    Dataset::new(columns, records).map_err(|e| IoError::Write(e.to_string()))
}
