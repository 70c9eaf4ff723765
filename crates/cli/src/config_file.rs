//! Filter config lookup: `--config` / `LEADSIFT_CONFIG`, then the user
//! config file, then built-in rules.

use std::path::{Path, PathBuf};

use leadsift_filter::FilterConfig;

use crate::exit_codes::EXIT_CONFIG;
use crate::CliError;

/// `<config dir>/leadsift/filters.toml`, e.g. `~/.config/leadsift/filters.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("leadsift").join("filters.toml"))
}

/// Resolve the config for a run. Returns the config and the file it came from.
pub fn load(explicit: Option<&Path>) -> Result<(FilterConfig, Option<PathBuf>), CliError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => user_config_path().filter(|p| p.is_file()),
    };

    match path {
        Some(path) => {
            let config = read_config(&path)?;
            log::info!("using filter config {}", path.display());
            Ok((config, Some(path)))
        }
        None => {
            log::debug!("using built-in filter rules");
            Ok((FilterConfig::default(), None))
        }
    }
}

fn read_config(path: &Path) -> Result<FilterConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(EXIT_CONFIG, format!("cannot read config {}: {e}", path.display()))
    })?;
    FilterConfig::from_toml(&text)
        .map_err(|e| CliError::new(EXIT_CONFIG, format!("{}: {e}", path.display())))
}

pub fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&path)?;
    eprintln!(
        "valid: email column '{}', {} office alias(es), {} domain(s), {} keyword(s), {} tld suffix(es)",
        config.email_column,
        config.office_columns.len(),
        config.domains.len(),
        config.keywords.len(),
        config.tld_suffixes.len(),
    );
    Ok(())
}

pub fn cmd_defaults() -> Result<(), CliError> {
    let text = FilterConfig::default()
        .to_toml()
        .map_err(|e| CliError::new(crate::exit_codes::EXIT_ERROR, e.to_string()))?;
    print!("{text}");
    Ok(())
}
