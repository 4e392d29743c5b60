//! File Type Validator
//!
//! Sniffs the content of every uploaded file and checks the detected MIME
//! type against the configured include and exclude lists. Problems with the
//! files themselves are reported as file errors, one per rejected file.

use crate::form::{Element, Form};
use crate::form_data::FormData;
use crate::host::HostContext;
use crate::properties::Properties;
use crate::validator::{mandatory_decoration, FormValidator, ValidatorPlugin};
use rusty_validators_core::{clean_mime_type, has_any_value, MimeFilter};
use std::path::Path;
use tracing::{debug, warn};

pub const NOT_A_FILE_ELEMENT: &str = "Field is not a File Download Security";

pub struct FileTypeValidator {
    properties: Properties,
    host: HostContext,
}

impl FileTypeValidator {
    fn is_mandatory(&self) -> bool {
        self.properties.is_true("mandatory")
    }

    /// MIME types of an `includes`/`excludes` grid
    fn mime_property(&self, key: &str) -> Vec<String> {
        self.properties.grid_column(key, "mimeType")
    }

    fn filter(&self) -> MimeFilter {
        MimeFilter::new(self.mime_property("includes"), self.mime_property("excludes"))
    }

    fn rejection_message(&self, file_name: &str) -> String {
        let custom = self.properties.get_string("errorMessage");
        let custom = custom.trim();

        if custom.is_empty() {
            format!("Invalid type for file {}", file_name)
        } else {
            format!("{} {}", file_name, custom)
        }
    }
}

impl ValidatorPlugin for FileTypeValidator {
    const CLASS_NAME: &'static str = "FileTypeValidator";
    const LABEL: &'static str = "File Type Validator";
    const PROPERTY_OPTIONS: &'static str =
        include_str!("../../resources/properties/FileTypeValidator.json");

    fn from_properties(properties: Properties, host: HostContext) -> Self {
        Self { properties, host }
    }
}

impl FormValidator for FileTypeValidator {
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
        let element_name = element.parameter_name();

        if !element.is_file_element() {
            form_data.add_file_error(element_name, NOT_A_FILE_ELEMENT);
            return false;
        }

        if self.is_mandatory() && !has_any_value(values) {
            form_data.add_form_error(element_name, self.host.missing_value_message());
            return false;
        }

        let filter = self.filter();

        for value in values.iter().filter(|v| !v.is_empty()) {
            let file = match self.host.files.resolve(value, element, form_data.primary_key()) {
                Ok(file) => file,
                Err(e) => {
                    debug!(element = element_name, error = %e, "skipping unresolved file");
                    continue;
                }
            };

            let mime_type = match self.host.sniffer.detect(&file) {
                Ok(detected) => clean_mime_type(&detected),
                Err(e) => {
                    warn!(element = element_name, file = %file.display(), error = %e, "content type detection failed");
                    continue;
                }
            };

            if !filter.accepts(&mime_type) {
                let file_name = file_name(&file, value);
                warn!(
                    element = element_name,
                    mime_type = %mime_type,
                    file = %file_name,
                    "invalid mime type"
                );
                form_data.add_file_error(element_name, self.rejection_message(&file_name));
            }
        }

        !form_data.file_errors().contains_key(element_name)
    }
}

fn file_name(file: &Path, fallback: &str) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}
