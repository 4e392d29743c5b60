use anyhow::{Context, Result};
use colored::Colorize;
use rusty_validators::{validate_form, Form, FormData, HostContext, Submission, ValidationResult};
use std::fs;
use std::path::Path;
use tracing::info;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {} file: {}", what, path.display()))
}

/// Loads both files and runs every configured validator
pub fn run(host: &HostContext, form_path: &Path, submission_path: &Path) -> Result<ValidationResult> {
    let form: Form = read_json(form_path, "form")?;
    let submission: Submission = read_json(submission_path, "submission")?;

    info!(form = %form.id, elements = form.elements.len(), "validating submission");

    let mut form_data = FormData::from_submission(submission);
    Ok(validate_form(&form, &mut form_data, host))
}

/// Prints the outcome; returns whether the submission is valid
pub fn execute(host: &HostContext, form_path: &Path, submission_path: &Path) -> Result<bool> {
    let result = run(host, form_path, submission_path)?;

    if result.is_valid {
        println!("{}", "✓ Submission is valid".green().bold());
        return Ok(true);
    }

    println!("{}", "✗ Submission is invalid".red().bold());
    for (field, messages) in &result.errors {
        for message in messages {
            println!("  {}: {}", field.yellow(), message);
        }
    }

    Ok(false)
}
