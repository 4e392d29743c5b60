// File: src/form.rs
// Purpose: Form definition model (elements, kinds, configured validators)

use crate::properties::PluginRef;
use serde::{Deserialize, Serialize};

/// Kind of form element, as far as validators care
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    #[default]
    TextField,
    DatePicker,
    FileUpload,
    SelectBox,
    CheckBox,
    Hidden,
}

/// A single form element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,

    /// Request parameter name, defaults to the id
    #[serde(default)]
    pub param_name: Option<String>,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub kind: ElementKind,

    /// Display format of date pickers (`yy-mm-dd` style)
    #[serde(default)]
    pub format: String,

    #[serde(default)]
    pub validators: Vec<PluginRef>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_param_name(mut self, param_name: impl Into<String>) -> Self {
        self.param_name = Some(param_name.into());
        self
    }

    pub fn with_validator(mut self, validator: PluginRef) -> Self {
        self.validators.push(validator);
        self
    }

    /// Name the element's values are submitted under
    pub fn parameter_name(&self) -> &str {
        self.param_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }

    /// Only file uploads carry download security, and so stored files
    pub fn is_file_element(&self) -> bool {
        self.kind == ElementKind::FileUpload
    }

    pub fn is_date_picker(&self) -> bool {
        self.kind == ElementKind::DatePicker
    }
}

/// Root form; elements are kept flat in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn find_element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }
}
