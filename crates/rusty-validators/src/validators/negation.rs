//! Negation Validator
//!
//! Runs another configured validator and inverts its verdict. Errors the
//! inner validator records for the element are dropped when it fails, while
//! errors recorded earlier by other validators stay. `errorMessage` is
//! recorded when the inner validator passes.

use crate::form::{Element, Form};
use crate::form_data::FormData;
use crate::host::HostContext;
use crate::properties::Properties;
use crate::validator::{mandatory_decoration, FormValidator, ValidatorPlugin};
use rusty_validators_core::{validate_mandatory, Presence};
use tracing::{debug, warn};

pub const DEFAULT_ERROR_MESSAGE: &str = "Invalid value";

pub struct NegationValidator {
    properties: Properties,
    host: HostContext,
}

impl NegationValidator {
    fn is_mandatory(&self) -> bool {
        self.properties.is_true("isMandatory")
    }

    fn error_message(&self) -> String {
        self.properties
            .get_non_empty("errorMessage")
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
    }

    fn inner(&self) -> Option<Box<dyn FormValidator>> {
        let Some(plugin) = self.properties.get_plugin("validator") else {
            warn!("no validator configured to negate");
            return None;
        };

        self.host
            .registry
            .create_validator(&plugin, &self.host)
            .map_err(|e| warn!(error = %e, "validator to negate is unavailable"))
            .ok()
    }
}

impl ValidatorPlugin for NegationValidator {
    const CLASS_NAME: &'static str = "NegationValidator";
    const LABEL: &'static str = "Negation Validator";
    const PROPERTY_OPTIONS: &'static str =
        include_str!("../../resources/properties/NegationValidator.json");

    fn from_properties(properties: Properties, host: HostContext) -> Self {
        Self { properties, host }
    }
}

impl FormValidator for NegationValidator {
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
            if let Err(message) =
                validate_mandatory(values, Presence::AnyValue, self.host.missing_value_message())
            {
                form_data.add_form_error(&element.id, message);
                return false;
            }
        }

        let Some(inner) = self.inner() else {
            form_data.add_form_error(&element.id, self.error_message());
            return false;
        };

        let earlier_errors = form_data
            .form_errors()
            .get(&element.id)
            .cloned()
            .unwrap_or_default();

        if inner.validate(form, element, form_data, values) {
            debug!(element = %element.id, inner = inner.class_name(), "negated validator passed");
            form_data.add_form_error(&element.id, self.error_message());
            false
        } else {
            form_data.set_form_errors(&element.id, earlier_errors);
            true
        }
    }
}
