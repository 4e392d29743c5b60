// File: src/options.rs
// Purpose: Option rows and the binders that load them

use crate::form::Element;
use crate::form_data::FormData;
use crate::properties::Properties;
use serde::{Deserialize, Serialize};

/// One selectable option
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRow {
    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub label: String,
}

impl FormRow {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Supplies option rows for an element at validation time
pub trait OptionsBinder: Send + Sync {
    fn load(&self, element: &Element, primary_key: Option<&str>, form_data: &FormData) -> Vec<FormRow>;
}

impl<F> OptionsBinder for F
where
    F: Fn(&Element, Option<&str>, &FormData) -> Vec<FormRow> + Send + Sync,
{
    fn load(&self, element: &Element, primary_key: Option<&str>, form_data: &FormData) -> Vec<FormRow> {
        self(element, primary_key, form_data)
    }
}

/// Binder returning the `options` grid it was configured with
#[derive(Debug, Clone, Default)]
pub struct StaticOptionsBinder {
    options: Vec<FormRow>,
}

impl StaticOptionsBinder {
    pub const CLASS_NAME: &'static str = "StaticOptionsBinder";

    pub fn new(options: Vec<FormRow>) -> Self {
        Self { options }
    }

    pub fn from_properties(properties: &Properties) -> Self {
        Self::new(rows_from_grid(properties, "options"))
    }
}

impl OptionsBinder for StaticOptionsBinder {
    fn load(&self, _element: &Element, _primary_key: Option<&str>, _form_data: &FormData) -> Vec<FormRow> {
        self.options.clone()
    }
}

/// Reads a `{value, label}` grid property into rows
pub fn rows_from_grid(properties: &Properties, key: &str) -> Vec<FormRow> {
    let values = properties.grid_column(key, "value");
    let labels = properties.grid_column(key, "label");

    values
        .into_iter()
        .zip(labels)
        .map(|(value, label)| FormRow { value, label })
        .collect()
}
