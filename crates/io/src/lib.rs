// File I/O: contact tables in, partitioned reports out

pub mod csv;
pub mod error;
pub mod table;
pub mod xlsx;

use std::path::{Path, PathBuf};

use leadsift_filter::model::{Dataset, PartitionKind};

pub use error::IoError;

/// Sheet (and CSV file) naming for the five partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetNaming {
    /// `domain_filters`, `keyword_filters`, ...
    #[default]
    Snake,
    /// `Domain Filters`, `Keyword Filters`, ...
    Title,
}

impl SheetNaming {
    pub fn sheet_name(&self, kind: PartitionKind) -> &'static str {
        match self {
            Self::Snake => kind.snake_name(),
            Self::Title => kind.title_name(),
        }
    }
}

/// Input format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// xlsx, xlsm, xls, xlsb, ods
    Spreadsheet,
    /// csv, tsv, txt
    Delimited,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Spreadsheet),
            "csv" | "tsv" | "txt" => Ok(Self::Delimited),
            "" => Err(IoError::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
            other => Err(IoError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Worksheet to read; first sheet when unset.
    pub sheet: Option<String>,
    /// Field delimiter for delimited text; sniffed when unset.
    pub delimiter: Option<u8>,
}

/// Read a contact table. The first row is the header.
pub fn read_dataset(path: &Path, options: &ReadOptions) -> Result<Dataset, IoError> {
    let dataset = match InputFormat::from_path(path)? {
        InputFormat::Spreadsheet => crate::xlsx::import(path, options.sheet.as_deref())?,
        InputFormat::Delimited => crate::csv::import(path, options.delimiter)?,
    };
    log::info!(
        "read {} row(s) x {} column(s) from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

/// `<stem>_filtered.<ext>` next to the input.
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = if extension.is_empty() {
        format!("{stem}_filtered")
    } else {
        format!("{stem}_filtered.{extension}")
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_by_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.XLSX")).unwrap(), InputFormat::Spreadsheet);
        assert_eq!(InputFormat::from_path(Path::new("a.ods")).unwrap(), InputFormat::Spreadsheet);
        assert_eq!(InputFormat::from_path(Path::new("a.csv")).unwrap(), InputFormat::Delimited);
        assert!(matches!(
            InputFormat::from_path(Path::new("a.pdf")),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(InputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn output_path_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/tmp/leads.xlsx"), "xlsx"),
            PathBuf::from("/tmp/leads_filtered.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("leads.csv"), ""),
            PathBuf::from("leads_filtered")
        );
    }

    #[test]
    fn naming_variants() {
        assert_eq!(SheetNaming::Snake.sheet_name(PartitionKind::FullDataset), "full_dataset");
        assert_eq!(SheetNaming::Title.sheet_name(PartitionKind::FullDataset), "Full Dataset");
    }
}
