//! `leadsift run` - classify a contact list and write the report.

use std::path::{Path, PathBuf};

use serde::Serialize;

use leadsift_filter::model::{Meta, PartitionKind, Summary};
use leadsift_io::{default_output_path, ReadOptions};

use crate::exit_codes::EXIT_ERROR;
use crate::{CliError, Naming, OutputFormat};

pub struct RunArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub sheet: Option<String>,
    pub config: Option<PathBuf>,
    pub naming: Naming,
    pub format: OutputFormat,
    pub delimiter: Option<char>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    meta: &'a Meta,
    summary: &'a Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<String>,
    output: String,
}

/// True when `output` names the existing `input` file, however spelled.
fn same_file(input: &Path, output: &Path) -> bool {
    match (input.canonicalize(), resolve_output(output)) {
        (Ok(input), Some(output)) => input == output,
        _ => input == output,
    }
}

/// Absolute form of a path that may not exist yet: its parent is resolved
/// and the file name appended.
fn resolve_output(path: &Path) -> Option<PathBuf> {
    if let Ok(path) = path.canonicalize() {
        return Some(path);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let delimiter = match args.delimiter {
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => return Err(CliError::args(format!("delimiter must be ASCII, got {c:?}"))),
        None => None,
    };

    let output = match args.output {
        Some(path) => path,
        None => match args.format {
            OutputFormat::Xlsx => default_output_path(&args.input, "xlsx"),
            OutputFormat::Csv => default_output_path(&args.input, ""),
        },
    };
    if same_file(&args.input, &output) {
        return Err(CliError::args("output path is the same as the input")
            .with_hint("pass -o with a different file name"));
    }

    let (config, config_path) = crate::config_file::load(args.config.as_deref())?;

    let options = ReadOptions { sheet: args.sheet, delimiter };
    let dataset = leadsift_io::read_dataset(&args.input, &options).map_err(CliError::io)?;

    let report = leadsift_filter::run(&config, dataset).map_err(CliError::filter)?;

    let naming = args.naming.into();
    match args.format {
        OutputFormat::Xlsx => {
            leadsift_io::xlsx::export(&report, &output, naming).map_err(CliError::io)?;
        }
        OutputFormat::Csv => {
            leadsift_io::csv::export_dir(&report, &output, naming).map_err(CliError::io)?;
        }
    }

    if args.json {
        let out = RunOutput {
            meta: &report.meta,
            summary: &report.summary,
            config: config_path.map(|p| p.display().to_string()),
            output: output.display().to_string(),
        };
        let json_str = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if !args.quiet {
        let s = &report.summary;
        let count = |kind| report.rows(kind).len();
        eprintln!(
            "{} row(s) ({} dropped for blank office): {} domain, {} keyword, {} other, {} duplicate",
            s.rows,
            s.dropped_rows,
            count(PartitionKind::DomainFilters),
            count(PartitionKind::KeywordFilters),
            count(PartitionKind::OtherDomains),
            count(PartitionKind::Duplicates),
        );
        eprintln!("wrote {}", output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_file_sees_through_spelling() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("leads.xlsx");
        std::fs::write(&input, b"x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        assert!(same_file(&input, &dir.path().join(".").join("leads.xlsx")));
        assert!(same_file(&input, &dir.path().join("sub").join("..").join("leads.xlsx")));
        assert!(!same_file(&input, &dir.path().join("leads_filtered.xlsx")));
    }

    #[test]
    fn output_in_missing_directory_is_not_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("leads.xlsx");
        std::fs::write(&input, b"x").unwrap();
        assert!(!same_file(&input, &dir.path().join("nope").join("leads.xlsx")));
    }
}
