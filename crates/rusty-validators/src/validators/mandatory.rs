//! Mandatory Validator

use crate::form::{Element, Form};
use crate::form_data::FormData;
use crate::host::HostContext;
use crate::properties::Properties;
use crate::validator::{mandatory_decoration, FormValidator, ValidatorPlugin};
use rusty_validators_core::{validate_mandatory, Presence};

/// Requires at least one non-blank value
///
/// The check is on unless `mandatory` is explicitly set to something other
/// than `"true"`. `message` overrides the host's missing-value text.
pub struct MandatoryValidator {
    properties: Properties,
    host: HostContext,
}

impl MandatoryValidator {
    fn is_mandatory(&self) -> bool {
        !self.properties.contains("mandatory") || self.properties.is_true("mandatory")
    }

    fn message(&self) -> String {
        self.properties
            .get_non_empty("message")
            .unwrap_or_else(|| self.host.missing_value_message().to_string())
    }
}

impl ValidatorPlugin for MandatoryValidator {
    const CLASS_NAME: &'static str = "MandatoryValidator";
    const LABEL: &'static str = "Mandatory Validator";
    const PROPERTY_OPTIONS: &'static str =
        include_str!("../../resources/properties/MandatoryValidator.json");

    fn from_properties(properties: Properties, host: HostContext) -> Self {
        Self { properties, host }
    }
}

impl FormValidator for MandatoryValidator {
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
        if !self.is_mandatory() {
            return true;
        }

        match validate_mandatory(values, Presence::AnyValue, &self.message()) {
            Ok(()) => true,
            Err(message) => {
                form_data.add_form_error(&element.id, message);
                false
            }
        }
    }
}
