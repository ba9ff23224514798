//! `/etc/os-release` parsing.

use std::collections::HashMap;

/// Key/value pairs from an os-release file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    fields: HashMap<String, String>,
}

impl OsRelease {
    /// Parse `KEY=value` lines. Comments and blank lines are ignored and
    /// surrounding single or double quotes are stripped from values.
    pub fn parse(content: &str) -> Self {
        let fields = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// `ID`, lower-cased.
    pub fn id(&self) -> Option<String> {
        self.get("ID").map(str::to_lowercase)
    }

    /// `ID` followed by the space-separated `ID_LIKE` entries, lower-cased.
    pub fn lineage(&self) -> Vec<String> {
        self.id()
            .into_iter()
            .chain(
                self.get("ID_LIKE")
                    .unwrap_or_default()
                    .split_whitespace()
                    .map(str::to_lowercase),
            )
            .collect()
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTOS: &str = r#"NAME="CentOS Linux"
VERSION="7 (Core)"
ID="centos"
ID_LIKE="rhel fedora"
VERSION_ID="7"
# comment
PRETTY_NAME="CentOS Linux 7 (Core)"
"#;

    #[test]
    fn parses_quoted_values() {
        let release = OsRelease::parse(CENTOS);
        assert_eq!(release.get("NAME"), Some("CentOS Linux"));
        assert_eq!(release.get("VERSION_ID"), Some("7"));
        assert_eq!(release.id().as_deref(), Some("centos"));
    }

    #[test]
    fn lineage_lists_id_then_id_like() {
        let release = OsRelease::parse(CENTOS);
        assert_eq!(release.lineage(), vec!["centos", "rhel", "fedora"]);
    }

    #[test]
    fn single_quotes_and_bare_values() {
        let release = OsRelease::parse("ID=ubuntu\nNAME='Ubuntu'\n");
        assert_eq!(release.get("ID"), Some("ubuntu"));
        assert_eq!(release.get("NAME"), Some("Ubuntu"));
    }

    #[test]
    fn empty_values_are_absent() {
        let release = OsRelease::parse("VERSION_ID=\"\"\n");
        assert_eq!(release.get("VERSION_ID"), None);
        assert!(release.lineage().is_empty());
    }
}
