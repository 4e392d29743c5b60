//! End-to-end validation of decoded forms and submissions
//!
//! Forms and submissions are read from JSON the way the CLI reads them, and
//! uploads are real files sniffed by their magic bytes.

use pretty_assertions::assert_eq;
use rusty_validators::{
    validate_form, Activator, Config, Form, FormData, HostContext, PluginKind, PluginRegistry, Submission,
    UploadStore,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const PDF: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<<>>\nendobj\n";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x02\x00\x00\x00";

const APPLICATION_FORM: &str = r#"{
  "id": "application",
  "elements": [
    {
      "id": "email",
      "label": "Email",
      "validators": [{"className": "MandatoryValidator"}]
    },
    {
      "id": "backup_email",
      "label": "Backup Email",
      "validators": [
        {
          "className": "MultiFieldValidator",
          "properties": {"elements": [{"name": "email"}]}
        }
      ]
    },
    {
      "id": "start",
      "kind": "datePicker",
      "format": "yy-mm-dd",
      "validators": [
        {
          "className": "DateTimeValidator",
          "properties": {
            "dateFormat": "yyyy-MM-dd",
            "operator": "between",
            "dateFrom": "2023-01-01",
            "dateTo": "2023-12-31",
            "errorMessage": "Start must fall in 2023"
          }
        }
      ]
    },
    {
      "id": "resume",
      "kind": "fileUpload",
      "validators": [
        {
          "className": "FileTypeValidator",
          "properties": {
            "mandatory": "true",
            "includes": [{"mimeType": "application/pdf"}, {"mimeType": "text/plain"}]
          }
        }
      ]
    }
  ]
}"#;

struct Uploads {
    _root: TempDir,
    temp_dir: PathBuf,
    upload_dir: PathBuf,
}

impl Uploads {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let temp_dir = root.path().join("temp");
        let upload_dir = root.path().join("app_formuploads");
        fs::create_dir_all(&temp_dir).unwrap();
        fs::create_dir_all(&upload_dir).unwrap();

        Self {
            _root: root,
            temp_dir,
            upload_dir,
        }
    }

    fn temporary(&self, name: &str, content: &[u8]) {
        fs::write(self.temp_dir.join(name), content).unwrap();
    }

    fn stored(&self, primary_key: &str, name: &str, content: &[u8]) {
        let dir = self.upload_dir.join(primary_key);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn host(&self, registry: Arc<PluginRegistry>) -> HostContext {
        HostContext::new(registry, Config::default()).with_files(UploadStore::new(&self.temp_dir, &self.upload_dir))
    }
}

fn started_registry() -> Arc<PluginRegistry> {
    let registry = Arc::new(PluginRegistry::new());
    let _ = Activator::start(&registry);
    registry
}

fn submission(json: &str) -> FormData {
    let submission: Submission = serde_json::from_str(json).unwrap();
    FormData::from_submission(submission)
}

#[test]
fn test_valid_application() {
    let uploads = Uploads::new();
    uploads.temporary("cv.pdf", PDF);
    let host = uploads.host(started_registry());

    let form: Form = serde_json::from_str(APPLICATION_FORM).unwrap();
    let mut data = submission(
        r#"{"values": {
            "email": ["ada@example.com"],
            "backup_email": ["ada@backup.example.com"],
            "start": ["2023-06-15"],
            "resume": ["cv.pdf"]
        }}"#,
    );

    let result = validate_form(&form, &mut data, &host);

    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert!(result.is_valid);
}

#[test]
fn test_invalid_application_reports_every_field() {
    let uploads = Uploads::new();
    uploads.temporary("photo.png", PNG);
    let host = uploads.host(started_registry());

    let form: Form = serde_json::from_str(APPLICATION_FORM).unwrap();
    let mut data = submission(
        r#"{"values": {
            "email": ["ada@example.com"],
            "backup_email": ["ada@example.com"],
            "start": ["2024-01-01"],
            "resume": ["photo.png"]
        }}"#,
    );

    let result = validate_form(&form, &mut data, &host);

    assert!(!result.is_valid);
    assert_eq!(
        result.get_errors("backup_email").cloned(),
        Some(vec!["Value already assigned to field Email".to_string()])
    );
    assert_eq!(
        result.get_errors("start").cloned(),
        Some(vec!["Start must fall in 2023".to_string()])
    );
    assert_eq!(
        data.file_errors().get("resume").cloned(),
        Some(vec!["Invalid type for file photo.png".to_string()])
    );
    assert!(result.get_error("email").is_none());
}

#[test]
fn test_stored_upload_of_saved_record() {
    let uploads = Uploads::new();
    uploads.stored("rec-7", "notes.txt", "plain notes, ünïcode included".as_bytes());
    let host = uploads.host(started_registry());

    let form: Form = serde_json::from_str(APPLICATION_FORM).unwrap();
    let mut data = submission(
        r#"{"primaryKey": "rec-7", "values": {
            "email": ["ada@example.com"],
            "start": ["2023-02-02"],
            "resume": ["notes.txt"]
        }}"#,
    );

    let result = validate_form(&form, &mut data, &host);

    assert!(result.is_valid, "{:?}", result.errors);
}

#[test]
fn test_missing_mandatory_values() {
    let uploads = Uploads::new();
    let host = uploads.host(started_registry());

    let form: Form = serde_json::from_str(APPLICATION_FORM).unwrap();
    let mut data = submission(r#"{"values": {"start": ["2023-06-15"]}}"#);

    let result = validate_form(&form, &mut data, &host);

    assert!(!result.is_valid);
    assert_eq!(result.get_error("email").map(String::as_str), Some("Missing required value"));
    assert_eq!(result.get_error("resume").map(String::as_str), Some("Missing required value"));
}

#[test]
fn test_configured_missing_value_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rusty-validators.toml");
    fs::write(&path, "[messages]\nmissing_value = \"Wajib diisi\"\n").unwrap();

    let config = Config::load(&path).unwrap();
    let host = HostContext::new(started_registry(), config);

    let form: Form = serde_json::from_str(APPLICATION_FORM).unwrap();
    let mut data = submission(r#"{"values": {"start": ["2023-06-15"], "resume": ["x"]}}"#);

    let result = validate_form(&form, &mut data, &host);

    assert_eq!(result.get_error("email").map(String::as_str), Some("Wajib diisi"));
}

#[test]
fn test_stopped_activator_disables_validation() {
    let registry = Arc::new(PluginRegistry::new());
    let activator = Activator::start(&registry);
    let host = HostContext::new(registry.clone(), Config::default());
    let form: Form = serde_json::from_str(APPLICATION_FORM).unwrap();

    activator.stop(&registry);
    assert!(!registry.contains(PluginKind::Validator, "MandatoryValidator"));

    // every configured validator is now unknown and skipped
    let result = validate_form(&form, &mut FormData::new(), &host);
    assert!(result.is_valid);
}

#[test]
fn test_svg_upload_is_excluded() {
    let uploads = Uploads::new();
    uploads.temporary(
        "logo.svg",
        b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\"/>\n",
    );
    uploads.temporary("notes.txt", b"plain notes\n");
    let host = uploads.host(started_registry());

    let form: Form = serde_json::from_str(
        r#"{
          "id": "gallery",
          "elements": [
            {
              "id": "picture",
              "kind": "fileUpload",
              "validators": [
                {
                  "className": "FileTypeValidator",
                  "properties": {"excludes": [{"mimeType": "image/svg+xml"}]}
                }
              ]
            }
          ]
        }"#,
    )
    .unwrap();
    let mut data = submission(r#"{"values": {"picture": ["notes.txt", "logo.svg"]}}"#);

    let result = validate_form(&form, &mut data, &host);

    assert!(!result.is_valid);
    assert_eq!(
        data.file_errors().get("picture").cloned(),
        Some(vec!["Invalid type for file logo.svg".to_string()])
    );
}
