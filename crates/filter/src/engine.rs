use crate::config::FilterConfig;
use crate::duplicates::flag_duplicates;
use crate::error::FilterError;
use crate::matcher::Matchers;
use crate::model::{
    Classification, Dataset, Meta, PartitionCount, PartitionKind, PartitionedReport, Partitions,
    Summary,
};
use crate::partition::partition;
use crate::prefilter::drop_blank_office_rows;
use crate::resolve::resolve_office_column;

/// Classify and partition a dataset per config.
///
/// Fails before any matcher runs if the email column is missing.
pub fn run(config: &FilterConfig, mut dataset: Dataset) -> Result<PartitionedReport, FilterError> {
    let email_col = dataset
        .column_index(&config.email_column)
        .ok_or_else(|| FilterError::MissingEmailColumn {
            column: config.email_column.clone(),
            available: dataset.columns().to_vec(),
        })?;
    let matchers = Matchers::from_config(config)?;

    let input_rows = dataset.len();
    let office_column =
        resolve_office_column(dataset.columns(), &config.office_columns).map(str::to_string);
    match &office_column {
        Some(col) => log::debug!("office column resolved: '{col}'"),
        None => log::debug!("no office column found; keeping all rows"),
    }

    let dropped_rows = drop_blank_office_rows(&mut dataset, office_column.as_deref());
    if dropped_rows > 0 {
        log::info!("dropped {dropped_rows} of {input_rows} row(s) with a blank office column");
    }

    let classifications = classify(&dataset, email_col, &matchers);
    let partitions = partition(&classifications);
    let summary = summarize(
        &partitions,
        input_rows,
        dropped_rows,
        &config.email_column,
        office_column,
    );

    for count in &summary.partitions {
        log::debug!("{}: {} row(s)", count.partition, count.rows);
    }

    Ok(PartitionedReport {
        dataset,
        classifications,
        partitions,
        summary,
        meta: Meta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
    })
}

/// Evaluate every matcher per row. The matchers are independent of each
/// other and of row order.
pub fn classify(dataset: &Dataset, email_col: usize, matchers: &Matchers) -> Vec<Classification> {
    let duplicates = flag_duplicates(dataset, email_col);
    dataset
        .rows()
        .iter()
        .zip(duplicates)
        .map(|(record, duplicate)| {
            let email = record.get(email_col);
            Classification {
                domain_match: matchers.domain.matches_cell(email),
                keyword_match: matchers.keyword.matches_cell(email),
                duplicate,
            }
        })
        .collect()
}

fn summarize(
    partitions: &Partitions,
    input_rows: usize,
    dropped_rows: usize,
    email_column: &str,
    office_column: Option<String>,
) -> Summary {
    Summary {
        input_rows,
        dropped_rows,
        rows: partitions.full_dataset.len(),
        email_column: email_column.to_string(),
        office_column,
        partitions: PartitionKind::ALL
            .iter()
            .map(|&kind| PartitionCount {
                partition: kind,
                rows: partitions.get(kind).len(),
            })
            .collect(),
    }
}
