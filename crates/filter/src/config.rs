use serde::{Deserialize, Serialize};

use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Built-in rule sets
// ---------------------------------------------------------------------------

/// Accepted spellings of the office/company column.
pub const DEFAULT_OFFICE_COLUMNS: &[&str] = &[
    "Office Name",
    "Company Name",
    "Office Details",
    "Company Details",
    "Office Names",
    "Company Names",
    "Office Detail",
    "Company Detail",
];

/// Free-mail and consumer ISP domains.
pub const DEFAULT_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "ymail.com",
    "rocketmail.com",
    "hotmail.com",
    "live.com",
    "outlook.com",
    "msn.com",
    "aol.com",
    "aim.com",
    "verizon.net",
    "att.net",
    "sbcglobal.net",
    "bellsouth.net",
    "ameritech.net",
    "comcast.net",
    "charter.net",
    "cox.net",
    "protonmail.com",
    "proton.me",
    "mail.com",
    "gmx.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "zoho.com",
    "lycos.com",
    "fastmail.com",
    "tutanota.com",
    "earthlink.net",
    "citlink.net",
    "ca.rr.com",
    "roadrunner.com",
];

/// Role-account words, matched as whole words.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "abuse",
    "admin",
    "account",
    "advertise",
    "support",
    "webmaster",
    "website",
    "app",
    "apps",
    "customer",
    "info",
    "sales",
];

/// Institutional top-level domains, matched at the end of the address.
pub const DEFAULT_TLD_SUFFIXES: &[&str] = &["edu", "gov"];

pub const DEFAULT_EMAIL_COLUMN: &str = "Email";

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Rule sets injected into the resolver and matchers.
///
/// Every field is optional in TOML; omitted fields keep the built-in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Exact, case-sensitive name of the email column.
    pub email_column: String,
    /// Aliases for the office/company column (case/whitespace-insensitive).
    pub office_columns: Vec<String>,
    /// Domains matched as substrings of the lower-cased address.
    pub domains: Vec<String>,
    /// Literal words matched on word boundaries.
    pub keywords: Vec<String>,
    /// TLDs (without the dot) matched at the end of the address.
    pub tld_suffixes: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            email_column: DEFAULT_EMAIL_COLUMN.to_string(),
            office_columns: owned(DEFAULT_OFFICE_COLUMNS),
            domains: owned(DEFAULT_DOMAINS),
            keywords: owned(DEFAULT_KEYWORDS),
            tld_suffixes: owned(DEFAULT_TLD_SUFFIXES),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl FilterConfig {
    pub fn from_toml(input: &str) -> Result<Self, FilterError> {
        let config: FilterConfig =
            toml::from_str(input).map_err(|e| FilterError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, FilterError> {
        toml::to_string_pretty(self).map_err(|e| FilterError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if self.email_column.trim().is_empty() {
            return Err(FilterError::ConfigValidation(
                "email_column must not be blank".into(),
            ));
        }

        let lists: [(&str, &[String]); 4] = [
            ("office_columns", &self.office_columns),
            ("domains", &self.domains),
            ("keywords", &self.keywords),
            ("tld_suffixes", &self.tld_suffixes),
        ];
        for (name, list) in lists {
            if let Some(pos) = list.iter().position(|s| s.trim().is_empty()) {
                return Err(FilterError::ConfigValidation(format!(
                    "{name}[{pos}] is blank"
                )));
            }
        }

        if self.tld_suffixes.iter().any(|t| t.starts_with('.')) {
            return Err(FilterError::ConfigValidation(
                "tld_suffixes are given without the leading dot (e.g. \"edu\")".into(),
            ));
        }

        if self.domains.is_empty() && self.keywords.is_empty() && self.tld_suffixes.is_empty() {
            return Err(FilterError::ConfigValidation(
                "at least one domain, keyword or tld suffix is required".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_lists() {
        let config = FilterConfig::default();
        assert_eq!(config.email_column, "Email");
        assert_eq!(config.office_columns.len(), 8);
        assert_eq!(config.keywords.len(), 12);
        assert_eq!(config.tld_suffixes, vec!["edu", "gov"]);
        assert!(config.domains.contains(&"gmail.com".to_string()));
        config.validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = FilterConfig::from_toml(
            r#"
domains = ["example.net"]
keywords = ["billing"]
"#,
        )
        .unwrap();
        assert_eq!(config.domains, vec!["example.net"]);
        assert_eq!(config.keywords, vec!["billing"]);
        assert_eq!(config.email_column, "Email");
        assert_eq!(config.office_columns.len(), 8);
        assert_eq!(config.tld_suffixes, vec!["edu", "gov"]);
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = FilterConfig::default().to_toml().unwrap();
        let parsed = FilterConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, FilterConfig::default());
    }

    #[test]
    fn reject_blank_entry() {
        let err = FilterConfig::from_toml(r#"keywords = ["info", "  "]"#).unwrap_err();
        assert!(err.to_string().contains("keywords[1] is blank"));
    }

    #[test]
    fn reject_dotted_tld() {
        let err = FilterConfig::from_toml(r#"tld_suffixes = [".edu"]"#).unwrap_err();
        assert!(matches!(err, FilterError::ConfigValidation(_)));
    }

    #[test]
    fn reject_no_rules() {
        let err = FilterConfig::from_toml(
            r#"
domains = []
keywords = []
tld_suffixes = []
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn reject_unknown_field() {
        let err = FilterConfig::from_toml(r#"domain = ["gmail.com"]"#).unwrap_err();
        assert!(matches!(err, FilterError::ConfigParse(_)));
    }

    #[test]
    fn reject_blank_email_column() {
        let err = FilterConfig::from_toml(r#"email_column = "  ""#).unwrap_err();
        assert!(err.to_string().contains("email_column"));
    }
}
