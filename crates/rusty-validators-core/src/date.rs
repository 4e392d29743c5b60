//! Date pattern translation, parsing and comparison
//!
//! Two pattern dialects reach the validators:
//!
//! - **Java-style** patterns (`yyyy-MM-dd HH:mm`) configured on the validator
//!   itself.
//! - **Picker** formats (`yy-mm-dd`, `mm/dd/yy`) stored on date picker
//!   elements, in the jQuery UI dialect where `yy` is a four digit year and
//!   `mm` a two digit month.
//!
//! Picker formats are first rewritten into Java-style patterns, and Java-style
//! patterns are compiled into `chrono` format strings.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("date pattern is empty")]
    EmptyPattern,

    #[error("unsupported pattern letter '{letter}' in \"{pattern}\"")]
    UnsupportedPattern { pattern: String, letter: char },

    #[error("\"{value}\" does not match pattern \"{pattern}\"")]
    Parse { value: String, pattern: String },
}

/// A compiled date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    strftime: String,
}

impl DateFormat {
    /// Compiles a Java-style pattern such as `yyyy-MM-dd`
    pub fn from_java_pattern(pattern: &str) -> Result<Self, DateError> {
        if pattern.trim().is_empty() {
            return Err(DateError::EmptyPattern);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            strftime: java_to_strftime(pattern)?,
        })
    }

    /// Compiles a date picker display format such as `yy-mm-dd`
    pub fn from_picker_format(format: &str) -> Result<Self, DateError> {
        Self::from_java_pattern(&picker_to_java_pattern(format))
    }

    /// The Java-style pattern this format was built from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The `chrono` format string used for parsing
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Parses `value`; date-only patterns resolve to midnight
    pub fn parse(&self, value: &str) -> Result<NaiveDateTime, DateError> {
        let value = value.trim();

        NaiveDateTime::parse_from_str(value, &self.strftime)
            .or_else(|_| {
                NaiveDate::parse_from_str(value, &self.strftime)
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .map_err(|_| DateError::Parse {
                value: value.to_string(),
                pattern: self.pattern.clone(),
            })
    }
}

/// Rewrites a picker display format into a Java-style pattern
///
/// `DD`/`D` are day names, `MM`/`M` month names, `mm`/`m` month numbers,
/// `yy`/`y` four/two digit years and `tt`/`TT` the am/pm marker.
pub fn picker_to_java_pattern(format: &str) -> String {
    let mut pattern = format.to_string();

    pattern = if pattern.contains("DD") {
        pattern.replace("DD", "EEEE")
    } else {
        pattern.replace('D', "EEE")
    };

    pattern = if pattern.contains("MM") {
        pattern.replace("MM", "MMMMM")
    } else {
        pattern.replace('M', "MMM")
    };

    pattern = if pattern.contains("mm") {
        pattern.replace("mm", "MM")
    } else {
        pattern.replace('m', "M")
    };

    pattern = if pattern.contains("yy") {
        pattern.replace("yy", "yyyy")
    } else {
        pattern.replace('y', "yy")
    };

    if pattern.contains("tt") || pattern.contains("TT") {
        pattern = pattern.replace("tt", "a").replace("TT", "a");
    }

    pattern
}

/// Translates a Java-style pattern into a `chrono` format string
pub fn java_to_strftime(pattern: &str) -> Result<String, DateError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // quoted literal, '' is an escaped quote
            i += 1;
            if i < chars.len() && chars[i] == '\'' {
                out.push('\'');
                i += 1;
                continue;
            }
            while i < chars.len() && chars[i] != '\'' {
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let mut count = 1;
        while i + count < chars.len() && chars[i + count] == c {
            count += 1;
        }

        let spec = match (c, count) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1..=2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', _) => "%d",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('H', _) | ('k', _) => "%H",
            ('h', _) | ('K', _) => "%I",
            ('m', _) => "%M",
            ('s', _) => "%S",
            ('S', _) => "%3f",
            ('a', _) => "%p",
            ('z', _) | ('Z', _) | ('X', _) => "%z",
            _ => {
                return Err(DateError::UnsupportedPattern {
                    pattern: pattern.to_string(),
                    letter: c,
                })
            }
        };

        out.push_str(spec);
        i += count;
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Comparison applied between a submitted date and the configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOperator {
    /// Equal to the lower bound
    Exact,
    /// Strictly after the lower bound
    After,
    /// Strictly before the upper bound
    Before,
    /// Strictly between both bounds
    Between,
    /// No comparison configured, every date passes
    Unrestricted,
}

impl DateOperator {
    pub fn from_option(option: &str) -> Self {
        match option.trim() {
            "exact" => DateOperator::Exact,
            "after" => DateOperator::After,
            "before" => DateOperator::Before,
            "between" => DateOperator::Between,
            _ => DateOperator::Unrestricted,
        }
    }

    pub fn accepts(self, value: NaiveDateTime, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        match self {
            DateOperator::Exact => value == from,
            DateOperator::After => value > from,
            DateOperator::Before => value < to,
            DateOperator::Between => value > from && value < to,
            DateOperator::Unrestricted => true,
        }
    }
}
