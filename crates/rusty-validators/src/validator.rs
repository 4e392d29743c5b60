// File: src/validator.rs
// Purpose: The validator plugin contract

use crate::form::{Element, Form};
use crate::form_data::FormData;
use crate::host::HostContext;
use crate::properties::Properties;

/// A host-invoked check on the submitted values of one element
///
/// `validate` never fails loudly: problems are recorded on `form_data` and
/// reported through the returned flag.
pub trait FormValidator: Send + Sync {
    /// Registered class name
    fn class_name(&self) -> &'static str;

    /// Display name
    fn name(&self) -> &'static str;

    fn label(&self) -> &'static str {
        self.name()
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        env!("CARGO_PKG_DESCRIPTION")
    }

    /// JSON property schema shown by the form builder
    fn property_options(&self) -> &'static str;

    /// Marker shown next to the field label (`*` for mandatory fields)
    fn element_decoration(&self) -> String;

    /// Checks `values` submitted for `element`, recording errors on `form_data`
    fn validate(&self, form: &Form, element: &Element, form_data: &mut FormData, values: &[String]) -> bool;
}

/// A validator the registry can build from configuration
pub trait ValidatorPlugin: FormValidator + Sized + 'static {
    const CLASS_NAME: &'static str;
    const LABEL: &'static str;
    const PROPERTY_OPTIONS: &'static str;

    fn from_properties(properties: Properties, host: HostContext) -> Self;
}

/// `"*"` when `mandatory`, `""` otherwise
pub fn mandatory_decoration(mandatory: bool) -> String {
    if mandatory {
        "*".to_string()
    } else {
        String::new()
    }
}
