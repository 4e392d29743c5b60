pub mod list;
pub mod schema;
pub mod validate;

use anyhow::{bail, Result};
use rusty_validators::Config;
use std::path::Path;

/// An explicitly given file must exist; the default one may be absent
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if !path.exists() => bail!("Config file not found: {}", path.display()),
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
}
