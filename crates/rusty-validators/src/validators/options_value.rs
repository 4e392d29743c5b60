//! Options Value Validator

use crate::form::{Element, Form};
use crate::form_data::FormData;
use crate::host::HostContext;
use crate::options::rows_from_grid;
use crate::properties::Properties;
use crate::validator::{mandatory_decoration, FormValidator, ValidatorPlugin};
use rusty_validators_core::{validate_mandatory, DomainMatch, Presence};
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub const DEFAULT_MESSAGE: &str = "Invalid value";

/// Checks submitted values against the allowed options
///
/// The domain is the static `options` grid plus whatever the configured
/// `optionsBinder` loads. `matchingType` selects whether a value must be
/// inside the domain (`anyMatch`) or outside it (`noneMatch`).
pub struct OptionsValueValidator {
    properties: Properties,
    host: HostContext,
}

impl OptionsValueValidator {
    fn is_mandatory(&self) -> bool {
        self.properties.is_true("mandatory")
    }

    fn message(&self) -> String {
        self.properties
            .get_non_empty("message")
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string())
    }

    fn domain(&self, element: &Element, form_data: &FormData) -> BTreeSet<String> {
        let mut rows = rows_from_grid(&self.properties, "options");

        if let Some(plugin) = self.properties.get_plugin("optionsBinder") {
            match self.host.registry.create_options_binder(&plugin) {
                Ok(binder) => rows.extend(binder.load(element, form_data.primary_key(), form_data)),
                Err(e) => warn!(element = %element.id, error = %e, "options binder unavailable"),
            }
        }

        rows.into_iter()
            .map(|row| row.value)
            .filter(|value| !value.is_empty())
            .collect()
    }
}

impl ValidatorPlugin for OptionsValueValidator {
    const CLASS_NAME: &'static str = "OptionsValueValidator";
    const LABEL: &'static str = "Options Value Validator";
    const PROPERTY_OPTIONS: &'static str =
        include_str!("../../resources/properties/OptionsValueValidator.json");

    fn from_properties(properties: Properties, host: HostContext) -> Self {
        Self { properties, host }
    }
}

impl FormValidator for OptionsValueValidator {
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
        mandatory_decoration(self.is_mandatory())
    }

    fn validate(&self, _form: &Form, element: &Element, form_data: &mut FormData, values: &[String]) -> bool {
        if self.is_mandatory() {
            if let Err(message) =
                validate_mandatory(values, Presence::EveryValue, self.host.missing_value_message())
            {
                form_data.add_form_error(element.parameter_name(), message);
                return false;
            }
        }

        let domain = self.domain(element, form_data);
        let matching = DomainMatch::from_option(&self.properties.get_string("matchingType"));
        debug!(element = %element.id, ?matching, domain = domain.len(), "checking options");

        if matching.test(values, &domain) {
            true
        } else {
            form_data.add_form_error(element.parameter_name(), self.message());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FormRow;
    use crate::form::ElementKind;
    use crate::validators::test_support::{host, strings};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn abc() -> serde_json::Value {
        json!([
            {"value": "a", "label": "A"},
            {"value": "b", "label": "B"},
            {"value": "c", "label": "C"}
        ])
    }

    fn run(properties: serde_json::Value, values: &[&str]) -> (bool, FormData) {
        run_with(host(), properties, values)
    }

    fn run_with(host: HostContext, properties: serde_json::Value, values: &[&str]) -> (bool, FormData) {
        let v = OptionsValueValidator::from_properties(Properties::from_json(properties).unwrap(), host);
        let element = Element::new("choice", ElementKind::SelectBox);
        let mut data = FormData::new();
        let valid = v.validate(&Form::new("f"), &element, &mut data, &strings(values));
        (valid, data)
    }

    #[rstest]
    #[case("noneMatch", &["d"], true)]
    #[case("noneMatch", &["a"], false)]
    #[case("NONEMATCH", &["d", "b"], false)]
    #[case("anyMatch", &["a"], true)]
    #[case("anyMatch", &["d", "b"], true)]
    #[case("anyMatch", &["d"], false)]
    #[case("", &["d"], false)]
    #[case("somethingElse", &["c"], true)]
    fn test_matching_type(#[case] matching: &str, #[case] values: &[&str], #[case] expected: bool) {
        let (valid, data) = run(json!({"matchingType": matching, "options": abc()}), values);

        assert_eq!(valid, expected);
        assert_eq!(data.has_error("choice"), !expected);
    }

    #[test]
    fn test_failure_message() {
        let (_, data) = run(json!({"options": abc(), "message": "Not an option"}), &["z"]);
        assert_eq!(data.get_error("choice"), Some("Not an option"));

        let (_, data) = run(json!({"options": abc()}), &["z"]);
        assert_eq!(data.get_error("choice"), Some(DEFAULT_MESSAGE));
    }

    #[test]
    fn test_binder_rows_join_the_domain() {
        let properties = json!({
            "options": abc(),
            "optionsBinder": {
                "className": "StaticOptionsBinder",
                "properties": {"options": [{"value": "x", "label": "X"}, {"value": "", "label": "None"}]}
            }
        });

        assert!(run(properties.clone(), &["x"]).0);
        assert!(!run(properties, &[""]).0);
    }

    #[test]
    fn test_custom_binder_sees_primary_key() {
        let host = host();
        host.registry.register_options_binder(
            "RecordOptions",
            Arc::new(|_: Properties| -> Box<dyn crate::options::OptionsBinder> {
                Box::new(|_: &Element, pk: Option<&str>, _: &FormData| {
                    pk.map(|pk| vec![FormRow::new(pk, pk)]).unwrap_or_default()
                })
            }),
        );

        let v = OptionsValueValidator::from_properties(
            Properties::from_json(json!({"optionsBinder": {"className": "RecordOptions"}})).unwrap(),
            host,
        );
        let element = Element::new("choice", ElementKind::SelectBox);
        let mut data = FormData::new().with_primary_key("42");

        assert!(v.validate(&Form::new("f"), &element, &mut data, &strings(&["42"])));
        assert!(!v.validate(&Form::new("f"), &element, &mut data, &strings(&["41"])));
    }

    #[test]
    fn test_unknown_binder_leaves_static_domain() {
        let properties = json!({"options": abc(), "optionsBinder": {"className": "Gone"}});
        assert!(run(properties, &["a"]).0);
    }

    #[test]
    fn test_errors_keyed_on_parameter_name() {
        let v = OptionsValueValidator::from_properties(
            Properties::from_json(json!({"mandatory": "true", "options": abc()})).unwrap(),
            host(),
        );
        let element = Element::new("choice", ElementKind::SelectBox).with_param_name("choice_value");

        let mut data = FormData::new();
        assert!(!v.validate(&Form::new("f"), &element, &mut data, &[]));
        assert_eq!(data.get_error("choice_value"), Some("Missing required value"));

        let mut data = FormData::new();
        assert!(!v.validate(&Form::new("f"), &element, &mut data, &strings(&["z"])));
        assert_eq!(data.get_error("choice_value"), Some(DEFAULT_MESSAGE));
        assert!(!data.has_error("choice"));
    }

    #[test]
    fn test_mandatory_requires_every_value() {
        let (valid, data) = run(json!({"mandatory": "true", "options": abc()}), &["a", ""]);

        assert!(!valid);
        assert_eq!(data.get_error("choice"), Some("Missing required value"));
    }
}
