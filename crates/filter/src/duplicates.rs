use std::collections::HashMap;

use crate::model::{CellValue, Dataset};

/// Flag every row whose `col` value occurs in two or more rows.
///
/// Comparison is exact (case-sensitive); blank cells are equal to each
/// other. All occurrences are flagged, not only the repeats.
pub fn flag_duplicates(dataset: &Dataset, col: usize) -> Vec<bool> {
    let mut counts: HashMap<&CellValue, usize> = HashMap::new();
    for record in dataset.rows() {
        *counts.entry(record.get(col)).or_default() += 1;
    }
    dataset
        .rows()
        .iter()
        .map(|record| counts[record.get(col)] > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn emails(values: Vec<CellValue>) -> Dataset {
        let rows = values.into_iter().map(|v| Record::new(vec![v])).collect();
        Dataset::new(vec!["Email".into()], rows).unwrap()
    }

    #[test]
    fn all_occurrences_flagged() {
        let ds = emails(vec![
            "a@x.com".into(),
            "b@x.com".into(),
            "a@x.com".into(),
            "a@x.com".into(),
        ]);
        assert_eq!(flag_duplicates(&ds, 0), vec![true, false, true, true]);
    }

    #[test]
    fn case_sensitive() {
        let ds = emails(vec!["A@x.com".into(), "a@x.com".into()]);
        assert_eq!(flag_duplicates(&ds, 0), vec![false, false]);
    }

    #[test]
    fn blanks_are_equal() {
        let ds = emails(vec![CellValue::Empty, "a@x.com".into(), CellValue::Empty]);
        assert_eq!(flag_duplicates(&ds, 0), vec![true, false, true]);
    }

    #[test]
    fn single_blank_is_unique() {
        let ds = emails(vec![CellValue::Empty, "a@x.com".into()]);
        assert_eq!(flag_duplicates(&ds, 0), vec![false, false]);
    }

    #[test]
    fn empty_dataset() {
        assert!(flag_duplicates(&emails(vec![]), 0).is_empty());
    }
}
