// File: src/form_data.rs
// Purpose: Submitted request parameters plus the error collections validators write to

use crate::form::Element;
use rusty_validators_core::VALUE_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A form submission as decoded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub primary_key: Option<String>,

    #[serde(default)]
    pub values: BTreeMap<String, Vec<String>>,
}

/// State of one form submission
///
/// Holds the request parameters and two error maps keyed by field: form
/// errors for value problems and file errors for upload problems. The host
/// reads both back for display after every validator has run.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    primary_key: Option<String>,
    params: BTreeMap<String, Vec<String>>,
    form_errors: BTreeMap<String, Vec<String>>,
    file_errors: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_submission(submission: Submission) -> Self {
        Self {
            primary_key: submission.primary_key.filter(|pk| !pk.is_empty()),
            params: submission.values,
            ..Self::default()
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Replace the values of a request parameter
    pub fn set_param<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params
            .insert(name.into(), values.into_iter().map(Into::into).collect());
    }

    /// All values submitted under `name`
    pub fn params(&self, name: &str) -> &[String] {
        self.params.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// An element's submitted value, multi-values joined with `;`
    pub fn request_parameter(&self, element: &Element) -> Option<String> {
        self.params
            .get(element.parameter_name())
            .map(|values| values.join(VALUE_SEPARATOR.to_string().as_str()))
    }

    pub fn add_form_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.form_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_file_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.file_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Drop every form error recorded for `field`
    pub fn remove_form_errors(&mut self, field: &str) -> Option<Vec<String>> {
        self.form_errors.remove(field)
    }

    /// Replace the form errors of `field`; an empty list removes the entry
    pub fn set_form_errors(&mut self, field: impl Into<String>, errors: Vec<String>) {
        let field = field.into();
        if errors.is_empty() {
            self.form_errors.remove(&field);
        } else {
            self.form_errors.insert(field, errors);
        }
    }

    pub fn form_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.form_errors
    }

    pub fn file_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.file_errors
    }

    /// First form error for a field
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.form_errors
            .get(field)
            .and_then(|errors| errors.first())
            .map(String::as_str)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.form_errors.contains_key(field) || self.file_errors.contains_key(field)
    }

    pub fn has_errors(&self) -> bool {
        !self.form_errors.is_empty() || !self.file_errors.is_empty()
    }

    /// Form and file errors merged per field, form errors first
    pub fn all_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut errors = self.form_errors.clone();
        for (field, messages) in &self.file_errors {
            errors
                .entry(field.clone())
                .or_default()
                .extend(messages.iter().cloned());
        }
        errors
    }
}
