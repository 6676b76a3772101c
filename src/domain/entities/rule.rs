use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::application::errors::RegistryError;

/// How a rule string is compared against message content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    Exact,
    Prefix,
    Suffix,
    Contains,
}

impl MatchKind {
    /// Evaluation order of a dispatch cycle
    pub const ALL: [MatchKind; 4] = [
        MatchKind::Exact,
        MatchKind::Prefix,
        MatchKind::Suffix,
        MatchKind::Contains,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Prefix => "prefix",
            MatchKind::Suffix => "suffix",
            MatchKind::Contains => "contains",
        }
    }

    pub fn matches(&self, rule: &str, content: &str) -> bool {
        match self {
            MatchKind::Exact => content == rule,
            MatchKind::Prefix => content.starts_with(rule),
            MatchKind::Suffix => content.ends_with(rule),
            MatchKind::Contains => content.contains(rule),
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" | "keyword" => Ok(MatchKind::Exact),
            "prefix" => Ok(MatchKind::Prefix),
            "suffix" => Ok(MatchKind::Suffix),
            "contains" | "substring" => Ok(MatchKind::Contains),
            other => Err(RegistryError::InvalidArgument(format!(
                "unknown match kind '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_per_kind() {
        assert!(MatchKind::Exact.matches("hi", "hi"));
        assert!(!MatchKind::Exact.matches("hi", "hi there"));

        assert!(MatchKind::Prefix.matches("he", "hello"));
        assert!(!MatchKind::Prefix.matches("he", "oh hello"));

        assert!(MatchKind::Suffix.matches("lo", "hello"));
        assert!(!MatchKind::Suffix.matches("he", "hello"));

        assert!(MatchKind::Contains.matches("cat", "concatenate"));
        assert!(!MatchKind::Contains.matches("dog", "concatenate"));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("exact".parse::<MatchKind>().unwrap(), MatchKind::Exact);
        assert_eq!(" Prefix ".parse::<MatchKind>().unwrap(), MatchKind::Prefix);
        assert_eq!("substring".parse::<MatchKind>().unwrap(), MatchKind::Contains);
        assert_eq!("keyword".parse::<MatchKind>().unwrap(), MatchKind::Exact);

        let err = "regex".parse::<MatchKind>().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));
    }
}
