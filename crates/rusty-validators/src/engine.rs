// File: src/engine.rs
// Purpose: Runs every configured validator of a form against a submission

use crate::form::Form;
use crate::form_data::FormData;
use crate::host::HostContext;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Result of validating a whole form
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Form and file errors, keyed by field
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// First error recorded for `field`
    pub fn get_error(&self, field: &str) -> Option<&String> {
        self.errors.get(field).and_then(|errors| errors.first())
    }

    pub fn get_errors(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }
}

/// Validates every element of `form` in order
///
/// Each configured validator sees the values submitted under the element's
/// parameter name. Validators whose class is not registered are skipped.
pub fn validate_form(form: &Form, form_data: &mut FormData, host: &HostContext) -> ValidationResult {
    let mut is_valid = true;

    for element in &form.elements {
        let values = form_data.params(element.parameter_name()).to_vec();

        for plugin in &element.validators {
            let validator = match host.registry.create_validator(plugin, host) {
                Ok(validator) => validator,
                Err(e) => {
                    warn!(element = %element.id, error = %e, "skipping validator");
                    continue;
                }
            };

            let valid = validator.validate(form, element, form_data, &values);
            debug!(element = %element.id, validator = validator.class_name(), valid, "validated");
            is_valid &= valid;
        }
    }

    ValidationResult {
        is_valid,
        errors: form_data.all_errors(),
    }
}
