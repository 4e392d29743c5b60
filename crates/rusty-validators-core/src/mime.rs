//! MIME type normalisation and allow/deny filtering

use std::collections::BTreeSet;

/// Strips parameters from a MIME type (`text/plain;charset=utf-8` -> `text/plain`)
pub fn clean_mime_type(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Include/exclude lists of MIME types
///
/// Both lists are normalised with [`clean_mime_type`] and compared
/// case-insensitively. An empty include list allows everything; an empty
/// exclude list denies nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeFilter {
    includes: BTreeSet<String>,
    excludes: BTreeSet<String>,
}

impl MimeFilter {
    pub fn new<I, E, S, T>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            includes: normalize_all(includes),
            excludes: normalize_all(excludes),
        }
    }

    pub fn includes(&self) -> &BTreeSet<String> {
        &self.includes
    }

    pub fn excludes(&self) -> &BTreeSet<String> {
        &self.excludes
    }

    /// Whether a detected MIME type passes both lists
    pub fn accepts(&self, mime_type: &str) -> bool {
        let mime_type = normalize(mime_type);

        (self.includes.is_empty() || self.includes.contains(&mime_type))
            && (self.excludes.is_empty() || !self.excludes.contains(&mime_type))
    }
}

fn normalize(mime_type: &str) -> String {
    clean_mime_type(mime_type).to_ascii_lowercase()
}

fn normalize_all<I, S>(types: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    types
        .into_iter()
        .map(|s| normalize(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}
