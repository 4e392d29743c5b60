//! Semicolon-delimited value sets and set matching strategies

use regex::Regex;
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

/// Separator the host uses when a multi-valued field is flattened to one string
pub const VALUE_SEPARATOR: char = ';';

/// Splits a delimited string into its non-empty parts, in order
pub fn split_values(value: &str) -> Vec<String> {
    value
        .split(VALUE_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits every entry of a multi-valued field and collects the distinct parts
pub fn value_set<S: AsRef<str>>(values: &[S]) -> BTreeSet<String> {
    values
        .iter()
        .flat_map(|v| split_values(v.as_ref()))
        .collect()
}

/// True when the two sets share at least one value
pub fn intersects(left: &BTreeSet<String>, right: &BTreeSet<String>) -> bool {
    right.iter().any(|v| left.contains(v))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown match type: {0}")]
pub struct UnknownMatchType(pub String);

/// Strategy for comparing `values` against `withValues`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Every `withValue` is contained in `values`
    All,
    /// At least one `withValue` is contained in `values`
    Any,
    /// No `withValue` is contained in `values`
    None,
    /// Every value fully matches the `withValues` pattern
    Regex,
}

impl FromStr for MatchType {
    type Err = UnknownMatchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(MatchType::All),
            "any" => Ok(MatchType::Any),
            "none" => Ok(MatchType::None),
            "regex" => Ok(MatchType::Regex),
            _ => Err(UnknownMatchType(s.to_string())),
        }
    }
}

/// `values` contains every entry of `with_values`
pub fn all_match(values: &BTreeSet<String>, with_values: &[String]) -> bool {
    with_values.iter().all(|v| values.contains(v))
}

/// `values` contains at least one entry of `with_values`
pub fn any_match(values: &BTreeSet<String>, with_values: &[String]) -> bool {
    with_values.iter().any(|v| values.contains(v))
}

/// `values` contains none of `with_values`
pub fn none_match(values: &BTreeSet<String>, with_values: &[String]) -> bool {
    !any_match(values, with_values)
}

/// Compiles `pattern` so that it only matches a whole string
pub fn full_match_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

/// Every value matches `regex` from start to end
pub fn regex_match<'a, I>(values: I, regex: &Regex) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    values.into_iter().all(|v| regex.is_match(v))
}

/// How submitted values relate to an allowed-value domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainMatch {
    /// At least one submitted value belongs to the domain
    #[default]
    AnyMatch,
    /// No submitted value belongs to the domain
    NoneMatch,
}

impl DomainMatch {
    /// Parses the `matchingType` option; anything but `noneMatch` is `anyMatch`
    pub fn from_option(option: &str) -> Self {
        if option.trim().eq_ignore_ascii_case("noneMatch") {
            DomainMatch::NoneMatch
        } else {
            DomainMatch::AnyMatch
        }
    }

    pub fn test(self, values: &[String], domain: &BTreeSet<String>) -> bool {
        match self {
            DomainMatch::AnyMatch => values.iter().any(|v| domain.contains(v)),
            DomainMatch::NoneMatch => !values.iter().any(|v| domain.contains(v)),
        }
    }
}
