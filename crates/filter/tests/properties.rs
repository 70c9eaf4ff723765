// Partition invariants over generated contact lists.

use std::collections::BTreeSet;

use proptest::prelude::*;

use leadsift_filter::model::{CellValue, Dataset, PartitionKind, Record};
use leadsift_filter::prefilter::drop_blank_office_rows;
use leadsift_filter::{run, FilterConfig};

fn email_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        (
            prop::sample::select(vec!["a", "info", "happy", "sales", "bob.smith", "app"]),
            prop::sample::select(vec!["gmail.com", "acme.io", "school.edu", "eduplex.com", "aol.com"]),
        )
            .prop_map(|(local, host)| CellValue::text(format!("{local}@{host}"))),
    ]
}

fn office_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        Just(CellValue::text("")),
        Just(CellValue::text("   ")),
        Just(CellValue::text("Acme")),
        Just(CellValue::number(0.0)),
    ]
}

fn contacts() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((email_cell(), office_cell()), 0..24).prop_map(|rows| {
        let rows = rows
            .into_iter()
            .map(|(email, office)| Record::new(vec![email, office]))
            .collect();
        Dataset::new(vec!["Email".into(), "Company Name".into()], rows).unwrap()
    })
}

proptest! {
    #[test]
    fn other_is_complement_of_domain_and_keyword(ds in contacts()) {
        let report = run(&FilterConfig::default(), ds).unwrap();
        let domain: BTreeSet<_> = report.rows(PartitionKind::DomainFilters).iter().copied().collect();
        let keyword: BTreeSet<_> = report.rows(PartitionKind::KeywordFilters).iter().copied().collect();
        let other: BTreeSet<_> = report.rows(PartitionKind::OtherDomains).iter().copied().collect();
        let matched: BTreeSet<_> = domain.union(&keyword).copied().collect();

        prop_assert!(other.is_disjoint(&matched));
        let all: BTreeSet<_> = other.union(&matched).copied().collect();
        let full: BTreeSet<_> = report.rows(PartitionKind::FullDataset).iter().copied().collect();
        prop_assert_eq!(all, full);
    }

    #[test]
    fn duplicates_are_symmetric(ds in contacts()) {
        let report = run(&FilterConfig::default(), ds).unwrap();
        let rows = report.dataset.rows();
        let dups: BTreeSet<_> = report.rows(PartitionKind::Duplicates).iter().copied().collect();
        for (i, r) in rows.iter().enumerate() {
            let shared = rows
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && other.get(0) == r.get(0));
            prop_assert_eq!(dups.contains(&i), shared);
        }
    }

    #[test]
    fn full_dataset_bounds_every_sheet(ds in contacts()) {
        let report = run(&FilterConfig::default(), ds).unwrap();
        let full = report.rows(PartitionKind::FullDataset).len();
        prop_assert_eq!(full, report.dataset.len());
        for kind in PartitionKind::ALL {
            let rows = report.rows(kind);
            prop_assert!(rows.len() <= full);
            prop_assert!(rows.windows(2).all(|w| w[0] < w[1]), "{} out of order", kind);
        }
    }

    #[test]
    fn prefilter_is_idempotent(ds in contacts()) {
        let mut once = ds;
        drop_blank_office_rows(&mut once, Some("Company Name"));
        let mut twice = once.clone();
        prop_assert_eq!(drop_blank_office_rows(&mut twice, Some("Company Name")), 0);
        prop_assert_eq!(twice, once);
    }
}
