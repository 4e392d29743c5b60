//! # rusty-validators
//!
//! Form field validator plugins for a low-code workflow host. Each plugin
//! receives the submitted value(s) of one field, applies a rule configured
//! through a JSON property map, records messages on the shared [`FormData`]
//! and returns whether the field is valid.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rusty_validators::{Activator, Config, Form, FormData, HostContext, PluginRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(PluginRegistry::new());
//! let _activator = Activator::start(&registry);
//! let host = HostContext::new(registry, Config::default());
//!
//! let form: Form = serde_json::from_str(FORM_JSON)?;
//! let mut data = FormData::new();
//! data.set_param("email", ["a@example.com"]);
//!
//! let result = rusty_validators::validate_form(&form, &mut data, &host);
//! if !result.is_valid {
//!     println!("{:?}", result.errors);
//! }
//! ```
//!
//! ## Plugins
//!
//! | Class name               | Rule                                         |
//! |--------------------------|----------------------------------------------|
//! | `MandatoryValidator`     | at least one non-blank value                 |
//! | `FileTypeValidator`      | sniffed MIME type against include/exclude    |
//! | `MultiFieldValidator`    | values not already used by sibling fields    |
//! | `OptionsValueValidator`  | values against a static/loaded option domain |
//! | `DateTimeValidator`      | date against configured bounds               |
//! | `ValuesMatcherValidator` | all/any/none/regex set comparison            |
//! | `NegationValidator`      | inverts another configured validator         |

pub mod config;
pub mod engine;
pub mod error;
pub mod files;
pub mod form;
pub mod form_data;
pub mod host;
pub mod options;
pub mod properties;
pub mod registry;
pub mod sniff;
pub mod validator;
pub mod validators;

pub use config::Config;
pub use engine::{validate_form, ValidationResult};
pub use error::ValidatorError;
pub use files::{FileResolver, UploadStore};
pub use form::{Element, ElementKind, Form};
pub use form_data::{FormData, Submission};
pub use host::HostContext;
pub use options::{FormRow, OptionsBinder, StaticOptionsBinder};
pub use properties::{PluginRef, Properties};
pub use registry::{Activator, PluginKind, PluginRegistry, Registration};
pub use sniff::{ContentSniffer, MagicSniffer};
pub use validator::{FormValidator, ValidatorPlugin};
pub use validators::{
    DateTimeValidator, FileTypeValidator, MandatoryValidator, MultiFieldValidator,
    NegationValidator, OptionsValueValidator, ValuesMatcherValidator,
};

// Pure predicates, for hosts that want them without the plugin layer
pub use rusty_validators_core as core;
