//! Office/company column lookup.

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// First column (schema order) whose trimmed, lower-cased name equals a
/// trimmed, lower-cased alias. Exact comparison, not substring.
pub fn resolve_office_column<'a>(columns: &'a [String], aliases: &[String]) -> Option<&'a str> {
    let aliases: Vec<String> = aliases.iter().map(|a| normalize(a)).collect();
    columns
        .iter()
        .find(|col| aliases.contains(&normalize(col)))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_ignoring_case_and_whitespace() {
        let aliases = FilterConfig::default().office_columns;
        let columns = cols(&["Email", "  company NAME "]);
        assert_eq!(resolve_office_column(&columns, &aliases), Some("  company NAME "));
    }

    #[test]
    fn no_substring_matches() {
        let aliases = FilterConfig::default().office_columns;
        let columns = cols(&["Email", "Company Name (legal)", "Office"]);
        assert_eq!(resolve_office_column(&columns, &aliases), None);
    }

    #[test]
    fn first_in_schema_order_wins() {
        let aliases = FilterConfig::default().office_columns;
        let columns = cols(&["Office Name", "Email", "Company Name"]);
        assert_eq!(resolve_office_column(&columns, &aliases), Some("Office Name"));

        let columns = cols(&["Company Name", "Email", "Office Name"]);
        assert_eq!(resolve_office_column(&columns, &aliases), Some("Company Name"));
    }

    #[test]
    fn aliases_are_normalized_too() {
        let aliases = cols(&[" Firm "]);
        assert_eq!(resolve_office_column(&cols(&["firm"]), &aliases), Some("firm"));
    }
}
