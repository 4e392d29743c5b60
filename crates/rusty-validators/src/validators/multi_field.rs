//! Multi Field Validator
//!
//! Rejects a value that another field of the same form already holds. The
//! configured siblings are checked in order and every checked sibling's
//! values join the set the next one is compared against, so a value shared
//! by two siblings is caught as well.

use crate::form::{Element, Form};
use crate::form_data::FormData;
use crate::host::HostContext;
use crate::properties::Properties;
use crate::validator::{mandatory_decoration, FormValidator, ValidatorPlugin};
use rusty_validators_core::{intersects, split_values, validate_mandatory, value_set, Presence};
use tracing::debug;

pub struct MultiFieldValidator {
    properties: Properties,
    host: HostContext,
}

impl MultiFieldValidator {
    fn is_mandatory(&self) -> bool {
        self.properties.is_true("mandatory")
    }

    fn duplicate_message(&self, sibling: &Element, configured_name: &str) -> String {
        if let Some(message) = self.properties.get_non_empty("message") {
            return message;
        }

        let label = if sibling.label.trim().is_empty() {
            configured_name
        } else {
            sibling.label.as_str()
        };
        format!("Value already assigned to field {}", label)
    }
}

impl ValidatorPlugin for MultiFieldValidator {
    const CLASS_NAME: &'static str = "MultiFieldValidator";
    const LABEL: &'static str = "Multivalue Multi Field Validator";
    const PROPERTY_OPTIONS: &'static str =
        include_str!("../../resources/properties/MultiFieldValidator.json");

    fn from_properties(properties: Properties, host: HostContext) -> Self {
        Self { properties, host }
    }
}

impl FormValidator for MultiFieldValidator {
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

    fn validate(&self, form: &Form, element: &Element, form_data: &mut FormData, values: &[String]) -> bool {
        if self.is_mandatory() {
            let message = self
                .properties
                .get_non_empty("message")
                .unwrap_or_else(|| self.host.missing_value_message().to_string());

            if let Err(message) = validate_mandatory(values, Presence::EveryValue, &message) {
                form_data.add_form_error(element.parameter_name(), message);
                return false;
            }
        }

        let mut seen = value_set(values);

        for name in self.properties.grid_column("elements", "name") {
            let Some(sibling) = form.find_element(&name) else {
                debug!(element = %element.id, sibling = %name, "sibling field not found");
                continue;
            };

            let sibling_values = form_data
                .request_parameter(sibling)
                .map(|value| value_set(&split_values(&value)))
                .unwrap_or_default();

            if intersects(&seen, &sibling_values) {
                debug!(element = %element.id, sibling = %name, "duplicate value");
                form_data.add_form_error(&element.id, self.duplicate_message(sibling, &name));
                return false;
            }

            seen.extend(sibling_values);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ElementKind;
    use crate::validators::test_support::{host, strings};
    use serde_json::json;

    fn validator(properties: serde_json::Value) -> MultiFieldValidator {
        MultiFieldValidator::from_properties(Properties::from_json(properties).unwrap(), host())
    }

    fn form() -> Form {
        Form::new("contacts")
            .with_element(Element::new("primary", ElementKind::TextField).with_label("Primary Email"))
            .with_element(Element::new("secondary", ElementKind::TextField))
            .with_element(Element::new("other", ElementKind::CheckBox))
    }

    #[test]
    fn test_value_held_by_sibling_is_rejected() {
        let form = form();
        let element = Element::new("other", ElementKind::CheckBox);
        let mut data = FormData::new();
        data.set_param("primary", ["x"]);

        let valid = validator(json!({"elements": [{"name": "primary"}]}))
            .validate(&form, &element, &mut data, &split_values("x;y"));

        assert!(!valid);
        assert_eq!(data.get_error("other"), Some("Value already assigned to field Primary Email"));
    }

    #[test]
    fn test_distinct_values_pass() {
        let form = form();
        let element = Element::new("other", ElementKind::CheckBox);
        let mut data = FormData::new();
        data.set_param("primary", ["a"]);
        data.set_param("secondary", ["b"]);

        let valid = validator(json!({"elements": [{"name": "primary"}, {"name": "secondary"}]}))
            .validate(&form, &element, &mut data, &strings(&["c"]));

        assert!(valid);
        assert!(!data.has_errors());
    }

    #[test]
    fn test_siblings_sharing_a_value_are_caught() {
        let form = form();
        let element = Element::new("other", ElementKind::CheckBox);
        let mut data = FormData::new();
        data.set_param("primary", ["a", "b"]);
        data.set_param("secondary", ["b"]);

        let valid = validator(json!({"elements": [{"name": "primary"}, {"name": "secondary"}]}))
            .validate(&form, &element, &mut data, &strings(&["c"]));

        assert!(!valid);
        // unlabelled sibling falls back to its configured name
        assert_eq!(data.get_error("other"), Some("Value already assigned to field secondary"));
    }

    #[test]
    fn test_custom_message_and_unknown_sibling() {
        let form = form();
        let element = Element::new("other", ElementKind::CheckBox);
        let mut data = FormData::new();
        data.set_param("secondary", ["z"]);

        let properties = json!({
            "elements": [{"name": "missing"}, {"name": "secondary"}],
            "message": "Pick another value"
        });
        let valid = validator(properties).validate(&form, &element, &mut data, &strings(&["z"]));

        assert!(!valid);
        assert_eq!(data.get_error("other"), Some("Pick another value"));
    }

    #[test]
    fn test_mandatory_requires_every_value() {
        let form = form();
        let element = Element::new("other", ElementKind::CheckBox).with_param_name("other_values");
        let mut data = FormData::new();

        let valid = validator(json!({"mandatory": "true"}))
            .validate(&form, &element, &mut data, &strings(&["a", " "]));

        assert!(!valid);
        assert_eq!(data.get_error("other_values"), Some("Missing required value"));
        assert_eq!(validator(json!({"mandatory": "true"})).element_decoration(), "*");
    }
}
