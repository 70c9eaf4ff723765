//! Drop rows with a blank office/company cell.

use crate::model::{CellValue, Dataset};

/// True when the cell is present and its string form is not blank.
pub fn has_value(cell: &CellValue) -> bool {
    !cell.is_empty() && !cell.display().trim().is_empty()
}

/// Keep only rows whose `office_column` cell has a value. Without a
/// resolved column the dataset is returned unchanged. Returns the number of
/// dropped rows.
pub fn drop_blank_office_rows(dataset: &mut Dataset, office_column: Option<&str>) -> usize {
    let Some(col) = office_column.and_then(|name| dataset.column_index(name)) else {
        return 0;
    };
    let before = dataset.len();
    dataset.retain(|record| has_value(record.get(col)));
    before - dataset.len()
}
