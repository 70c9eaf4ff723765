use regex::{Regex, RegexBuilder};

use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::model::CellValue;

/// Matches addresses containing a known personal/free-mail domain.
///
/// Containment is unanchored: the domain may appear anywhere in the
/// lower-cased address, not only after the `@`.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    domains: Vec<String>,
}

impl DomainMatcher {
    pub fn new<S: AsRef<str>>(domains: &[S]) -> Self {
        Self {
            domains: domains.iter().map(|d| d.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn matches(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.domains.iter().any(|d| email.contains(d.as_str()))
    }

    /// Non-text cells never match.
    pub fn matches_cell(&self, cell: &CellValue) -> bool {
        cell.as_text().is_some_and(|s| self.matches(s))
    }
}

/// Matches role-account words (whole word) and institutional TLD endings.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    pattern: Option<Regex>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S], tld_suffixes: &[S]) -> Result<Self, FilterError> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|k| format!(r"\b{}\b", regex::escape(k.as_ref())))
            .chain(
                tld_suffixes
                    .iter()
                    .map(|t| format!(r"\.{}$", regex::escape(t.as_ref()))),
            )
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern: Some(pattern) })
    }

    pub fn matches(&self, email: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(email))
    }

    /// Non-text cells never match.
    pub fn matches_cell(&self, cell: &CellValue) -> bool {
        cell.as_text().is_some_and(|s| self.matches(s))
    }

    /// The compiled alternation, if any rules were configured.
    pub fn as_str(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }
}

/// Both matchers, built once from a config.
#[derive(Debug, Clone)]
pub struct Matchers {
    pub domain: DomainMatcher,
    pub keyword: KeywordMatcher,
}

impl Matchers {
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        Ok(Self {
            domain: DomainMatcher::new(&config.domains),
            keyword: KeywordMatcher::new(&config.keywords, &config.tld_suffixes)?,
        })
    }
}
