use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single cell as loaded from the input table.
///
/// Numbers compare and hash by value so a cell can serve directly as a
/// duplicate key. `Empty` equals `Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(OrderedFloat<f64>),
    Bool(bool),
    /// Spreadsheet date serial (1900 system).
    DateTime(OrderedFloat<f64>),
}

impl CellValue {
    pub fn number(n: f64) -> Self {
        Self::Number(OrderedFloat(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String form of the cell. Integral numbers render without decimals,
    /// so `0` stays `"0"` rather than blank.
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) | Self::DateTime(n) => format_number(n.0),
            Self::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One row of the input table, cells aligned with the dataset columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    cells: Vec<CellValue>,
}

impl Record {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Cell at `col`, `Empty` when out of range.
    pub fn get(&self, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.cells.get(col).unwrap_or(EMPTY)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<T: Into<CellValue>> FromIterator<T> for Record {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Ordered rows sharing one column schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Build a dataset. Every row must have exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Result<Self, FilterError> {
        if let Some((row, record)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(FilterError::RaggedRow {
                row,
                expected: columns.len(),
                found: record.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column named exactly `name` (case-sensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Keep the rows for which `keep` returns true, preserving order.
    pub fn retain(&mut self, keep: impl FnMut(&Record) -> bool) {
        self.rows.retain(keep);
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Per-row match flags. Derived, never stored on the row itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Classification {
    pub domain_match: bool,
    pub keyword_match: bool,
    pub duplicate: bool,
}

impl Classification {
    /// Neither a domain nor a keyword match.
    pub fn is_other(&self) -> bool {
        !(self.domain_match || self.keyword_match)
    }
}

// ---------------------------------------------------------------------------
// Partitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionKind {
    DomainFilters,
    KeywordFilters,
    OtherDomains,
    Duplicates,
    FullDataset,
}

impl PartitionKind {
    /// Output order of the report sheets.
    pub const ALL: [PartitionKind; 5] = [
        Self::DomainFilters,
        Self::KeywordFilters,
        Self::OtherDomains,
        Self::Duplicates,
        Self::FullDataset,
    ];

    pub fn snake_name(&self) -> &'static str {
        match self {
            Self::DomainFilters => "domain_filters",
            Self::KeywordFilters => "keyword_filters",
            Self::OtherDomains => "other_domains",
            Self::Duplicates => "duplicates",
            Self::FullDataset => "full_dataset",
        }
    }

    pub fn title_name(&self) -> &'static str {
        match self {
            Self::DomainFilters => "Domain Filters",
            Self::KeywordFilters => "Keyword Filters",
            Self::OtherDomains => "Other Domains",
            Self::Duplicates => "Duplicates",
            Self::FullDataset => "Full Dataset",
        }
    }
}

impl std::fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.snake_name())
    }
}

/// Row indices (into the filtered dataset) for each partition, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partitions {
    pub domain_filters: Vec<usize>,
    pub keyword_filters: Vec<usize>,
    pub other_domains: Vec<usize>,
    pub duplicates: Vec<usize>,
    pub full_dataset: Vec<usize>,
}

impl Partitions {
    pub fn get(&self, kind: PartitionKind) -> &[usize] {
        match kind {
            PartitionKind::DomainFilters => &self.domain_filters,
            PartitionKind::KeywordFilters => &self.keyword_filters,
            PartitionKind::OtherDomains => &self.other_domains,
            PartitionKind::Duplicates => &self.duplicates,
            PartitionKind::FullDataset => &self.full_dataset,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PartitionCount {
    pub partition: PartitionKind,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub input_rows: usize,
    pub dropped_rows: usize,
    pub rows: usize,
    pub email_column: String,
    pub office_column: Option<String>,
    pub partitions: Vec<PartitionCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub engine_version: String,
    pub run_at: String,
}

/// Result of one run: the filtered dataset and its five row groups.
#[derive(Debug, Clone)]
pub struct PartitionedReport {
    pub dataset: Dataset,
    pub classifications: Vec<Classification>,
    pub partitions: Partitions,
    pub summary: Summary,
    pub meta: Meta,
}

impl PartitionedReport {
    /// Row indices of one partition.
    pub fn rows(&self, kind: PartitionKind) -> &[usize] {
        self.partitions.get(kind)
    }

    /// Records of one partition, in original order.
    pub fn records(&self, kind: PartitionKind) -> impl Iterator<Item = &Record> + '_ {
        let rows = self.dataset.rows();
        self.partitions.get(kind).iter().map(move |&i| &rows[i])
    }

    pub fn columns(&self) -> &[String] {
        self.dataset.columns()
    }
}
