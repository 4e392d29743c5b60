//! Mandatory value checks

/// How strictly a mandatory flag is enforced on a multi-valued field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// At least one submitted entry must be non-blank
    AnyValue,
    /// There must be at least one entry and none of them may be blank
    EveryValue,
}

impl Presence {
    /// Whether `values` satisfy this presence rule
    pub fn is_satisfied(self, values: &[String]) -> bool {
        match self {
            Presence::AnyValue => has_any_value(values),
            Presence::EveryValue => has_every_value(values),
        }
    }
}

/// True when at least one entry is non-blank
pub fn has_any_value(values: &[String]) -> bool {
    values.iter().any(|v| !v.trim().is_empty())
}

/// True when the slice is non-empty and no entry is blank
pub fn has_every_value(values: &[String]) -> bool {
    !values.is_empty() && values.iter().all(|v| !v.trim().is_empty())
}

/// Validates a mandatory field, returning `message` on failure
pub fn validate_mandatory(values: &[String], presence: Presence, message: &str) -> Result<(), String> {
    if presence.is_satisfied(values) {
        Ok(())
    } else {
        Err(message.to_string())
    }
}
