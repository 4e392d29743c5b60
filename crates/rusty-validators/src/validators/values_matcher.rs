//! Values Matcher Validator

use crate::form::{Element, Form};
use crate::form_data::FormData;
use crate::host::HostContext;
use crate::properties::Properties;
use crate::validator::{FormValidator, ValidatorPlugin};
use rusty_validators_core::{
    all_match, any_match, full_match_regex, none_match, regex_match, split_values, value_set, MatchType,
};
use tracing::{debug, warn};

pub const DEFAULT_MESSAGE: &str = "Invalid value";

/// Compares a set of values with `withValues`
///
/// `values` is taken from the property when configured and from the
/// submission otherwise. Both sides are `;`-delimited, except under `regex`
/// where `withValues` is the pattern every value has to match in full.
pub struct ValuesMatcherValidator {
    properties: Properties,
}

impl ValuesMatcherValidator {
    fn values(&self, submitted: &[String]) -> Vec<String> {
        match self.properties.get_non_empty("values") {
            Some(configured) => split_values(&configured),
            None => submitted.iter().flat_map(|v| split_values(v)).collect(),
        }
    }

    fn matches(&self, element: &Element, values: &[String]) -> bool {
        let match_type = match self.properties.get_string("matchType").parse::<MatchType>() {
            Ok(match_type) => match_type,
            Err(e) => {
                warn!(element = %element.id, error = %e, "cannot compare values");
                return false;
            }
        };

        let with_values = self.properties.get_string("withValues");
        debug!(element = %element.id, ?match_type, ?values, with_values = %with_values, "matching values");

        match match_type {
            MatchType::All => all_match(&value_set(values), &split_values(&with_values)),
            MatchType::Any => any_match(&value_set(values), &split_values(&with_values)),
            MatchType::None => none_match(&value_set(values), &split_values(&with_values)),
            MatchType::Regex => match full_match_regex(&with_values) {
                Ok(regex) => regex_match(values, &regex),
                Err(e) => {
                    warn!(element = %element.id, pattern = %with_values, error = %e, "invalid pattern");
                    false
                }
            },
        }
    }
}

impl ValidatorPlugin for ValuesMatcherValidator {
    const CLASS_NAME: &'static str = "ValuesMatcherValidator";
    const LABEL: &'static str = "Values Matcher Validator";
    const PROPERTY_OPTIONS: &'static str =
        include_str!("../../resources/properties/ValuesMatcherValidator.json");

    fn from_properties(properties: Properties, _host: HostContext) -> Self {
        Self { properties }
    }
}

impl FormValidator for ValuesMatcherValidator {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn name(&self) -> &'static str {
        Self::LABEL
    }

    fn property_options(&self) -> &'static str {
        Self::PROPERTY_OPTIONS
    }

    fn element_decoration(&self) -> String {
        String::new()
    }

    fn validate(&self, _form: &Form, element: &Element, form_data: &mut FormData, values: &[String]) -> bool {
        let values = self.values(values);

        if self.matches(element, &values) {
            return true;
        }

        let message = self
            .properties
            .get_non_empty("errorMessage")
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        form_data.add_form_error(&element.id, message);
        false
    }
}
