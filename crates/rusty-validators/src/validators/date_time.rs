//! Date Time Validator
//!
//! Parses the submitted date and compares it with the configured bounds.
//! Date pickers are parsed with their own display format; any other element
//! uses the `dateFormat` pattern, which is also the format of both bounds.

use crate::form::{Element, Form};
use crate::form_data::FormData;
use crate::host::HostContext;
use crate::properties::Properties;
use crate::validator::{FormValidator, ValidatorPlugin};
use chrono::{Local, NaiveDateTime};
use rusty_validators_core::{DateError, DateFormat, DateOperator};
use tracing::debug;

pub const INVALID_DATE: &str = "Invalid date";
pub const DEFAULT_ERROR_MESSAGE: &str = "Invalid Date";

pub struct DateTimeValidator {
    properties: Properties,
    host: HostContext,
}

impl DateTimeValidator {
    fn date_format(&self) -> Result<DateFormat, DateError> {
        DateFormat::from_java_pattern(&self.properties.get_string("dateFormat"))
    }

    fn input_format(&self, element: &Element) -> Result<DateFormat, DateError> {
        if !element.is_date_picker() {
            return self.date_format();
        }

        let format = if element.format.trim().is_empty() {
            self.host.config.date.default_picker_format.as_str()
        } else {
            element.format.as_str()
        };
        DateFormat::from_picker_format(format)
    }

    fn parse_value(&self, element: &Element, values: &[String]) -> Option<NaiveDateTime> {
        let value = values.iter().find(|v| !v.is_empty())?;

        match self.input_format(element).and_then(|format| format.parse(value)) {
            Ok(date) => Some(date),
            Err(e) => {
                debug!(element = %element.id, error = %e, "unparseable date");
                None
            }
        }
    }

    /// A configured bound, or the current time when absent or unparseable
    fn bound(&self, key: &str, now: NaiveDateTime) -> NaiveDateTime {
        let Some(value) = self.properties.get_non_empty(key) else {
            return now;
        };

        self.date_format()
            .and_then(|format| format.parse(&value))
            .unwrap_or_else(|e| {
                debug!(bound = key, error = %e, "falling back to now");
                now
            })
    }

    fn error_message(&self) -> String {
        self.properties
            .get_non_empty("errorMessage")
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
    }
}

impl ValidatorPlugin for DateTimeValidator {
    const CLASS_NAME: &'static str = "DateTimeValidator";
    const LABEL: &'static str = "Date Time Validator";
    const PROPERTY_OPTIONS: &'static str =
        include_str!("../../resources/properties/DateTimeValidator.json");

    fn from_properties(properties: Properties, host: HostContext) -> Self {
        Self { properties, host }
    }
}

impl FormValidator for DateTimeValidator {
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
        "*".to_string()
    }

    fn validate(&self, _form: &Form, element: &Element, form_data: &mut FormData, values: &[String]) -> bool {
        let Some(date) = self.parse_value(element, values) else {
            form_data.add_form_error(&element.id, INVALID_DATE);
            return false;
        };

        let now = Local::now().naive_local();
        let operator = DateOperator::from_option(&self.properties.get_string("operator"));
        let valid = operator.accepts(date, self.bound("dateFrom", now), self.bound("dateTo", now));

        if !valid {
            form_data.add_form_error(&element.id, self.error_message());
        }
        valid
    }
}
