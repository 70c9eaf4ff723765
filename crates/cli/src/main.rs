// leadsift CLI - sort contact lists by email type into a multi-sheet report

mod config_file;
mod exit_codes;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use exit_codes::{filter_exit_code, io_exit_code, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "leadsift")]
#[command(about = "Sort contact lists by email type (free-mail, role account, duplicate, other)")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Log to stderr (-v info, -vv debug, -vvv trace). RUST_LOG overrides when unset.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a contact list and write the five-sheet report
    #[command(after_help = "\
Examples:
  leadsift run leads.xlsx
  leadsift run leads.xlsx -o sorted.xlsx --naming title
  leadsift run leads.csv --format csv -o sorted/
  leadsift run leads.xlsx --sheet Contacts --config filters.toml --json")]
    Run {
        /// Input table (.xlsx, .xlsm, .xls, .xlsb, .ods, .csv, .tsv)
        input: PathBuf,

        /// Output workbook (or directory with --format csv).
        /// Defaults to <input stem>_filtered.xlsx next to the input.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Worksheet to read (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Filter rules (TOML). Falls back to the user config file, then built-in rules.
        #[arg(long, env = "LEADSIFT_CONFIG")]
        config: Option<PathBuf>,

        /// Sheet naming style
        #[arg(long, value_enum, default_value_t = Naming::Snake)]
        naming: Naming,

        /// Report format
        #[arg(long, short = 't', value_enum, default_value_t = OutputFormat::Xlsx)]
        format: OutputFormat,

        /// CSV/TSV delimiter for the input (sniffed when omitted)
        #[arg(long)]
        delimiter: Option<char>,

        /// Print run summary as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Suppress the human summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a filter config without running
    #[command(after_help = "\
Examples:
  leadsift validate filters.toml")]
    Validate {
        /// Path to the filter config
        config: PathBuf,
    },

    /// Print the built-in filter rules as TOML
    #[command(after_help = "\
Examples:
  leadsift defaults > filters.toml")]
    Defaults,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Naming {
    /// domain_filters, keyword_filters, ...
    Snake,
    /// Domain Filters, Keyword Filters, ...
    Title,
}

impl From<Naming> for leadsift_io::SheetNaming {
    fn from(n: Naming) -> Self {
        match n {
            Naming::Snake => Self::Snake,
            Naming::Title => Self::Title,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One workbook, five sheets
    Xlsx,
    /// One directory, five CSV files
    Csv,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("LEADSIFT_COMMIT"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("LEADSIFT_TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("LEADSIFT_COMMIT"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("LEADSIFT_TARGET"),
        )
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // log records from the library crates are bridged by the fmt subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show usage
            eprintln!("Usage: leadsift <command> [options]");
            eprintln!("       leadsift --help for more information");
            Ok(())
        }
        Some(Commands::Run {
            input,
            output,
            sheet,
            config,
            naming,
            format,
            delimiter,
            json,
            quiet,
        }) => run::cmd_run(run::RunArgs {
            input,
            output,
            sheet,
            config,
            naming,
            format,
            delimiter,
            json,
            quiet,
        }),
        Some(Commands::Validate { config }) => config_file::cmd_validate(config),
        Some(Commands::Defaults) => config_file::cmd_defaults(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn filter(err: leadsift_filter::FilterError) -> Self {
        let hint = match &err {
            leadsift_filter::FilterError::MissingEmailColumn { .. } => Some(
                "the column name is case-sensitive; set email_column in a --config file to use another column"
                    .to_string(),
            ),
            _ => None,
        };
        Self { code: filter_exit_code(&err), message: err.to_string(), hint }
    }

    pub fn io(err: leadsift_io::IoError) -> Self {
        let hint = match &err {
            leadsift_io::IoError::UnsupportedFormat(_) => {
                Some("supported: .xlsx .xlsm .xls .xlsb .ods .csv .tsv .txt".to_string())
            }
            _ => None,
        };
        Self { code: io_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
