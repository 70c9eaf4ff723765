use crate::model::{Classification, Partitions};

/// Group row indices by classification, preserving row order.
///
/// A row matching both domain and keyword rules lands in both of those
/// groups and never in `other_domains`.
pub fn partition(classifications: &[Classification]) -> Partitions {
    let mut out = Partitions::default();
    for (i, c) in classifications.iter().enumerate() {
        if c.domain_match {
            out.domain_filters.push(i);
        }
        if c.keyword_match {
            out.keyword_filters.push(i);
        }
        if c.is_other() {
            out.other_domains.push(i);
        }
        if c.duplicate {
            out.duplicates.push(i);
        }
        out.full_dataset.push(i);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(domain_match: bool, keyword_match: bool, duplicate: bool) -> Classification {
        Classification { domain_match, keyword_match, duplicate }
    }

    #[test]
    fn overlapping_matches() {
        let p = partition(&[
            c(true, true, false),
            c(false, false, true),
            c(true, false, true),
            c(false, true, false),
        ]);
        assert_eq!(p.domain_filters, vec![0, 2]);
        assert_eq!(p.keyword_filters, vec![0, 3]);
        assert_eq!(p.other_domains, vec![1]);
        assert_eq!(p.duplicates, vec![1, 2]);
        assert_eq!(p.full_dataset, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(partition(&[]), Partitions::default());
    }
}
