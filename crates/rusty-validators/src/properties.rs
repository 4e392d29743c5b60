// File: src/properties.rs
// Purpose: Typed access to the JSON property map each plugin is configured with

use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Plugin configuration as supplied by the host form builder
///
/// Values are loosely typed: flags arrive as `"true"`/`"false"` strings,
/// lists as grids (arrays of objects) and nested plugins as [`PluginRef`]
/// objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Map<String, JsonValue>);

impl Properties {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build from a JSON value, which must be an object
    pub fn from_json(json: JsonValue) -> Result<Self> {
        match json {
            JsonValue::Object(map) => Ok(Self(map)),
            JsonValue::Null => Ok(Self::new()),
            other => Err(ValidatorError::InvalidProperties(other.to_string())),
        }
    }

    /// Builder-style setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String form of a scalar property; missing, null and containers are `""`
    pub fn get_string(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Bool(b)) => b.to_string(),
            Some(JsonValue::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Non-blank string property
    pub fn get_non_empty(&self, key: &str) -> Option<String> {
        let value = self.get_string(key);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Flag check, `"true"` compared case-insensitively
    pub fn is_true(&self, key: &str) -> bool {
        self.get_string(key).trim().eq_ignore_ascii_case("true")
    }

    /// Rows of a grid property; non-object rows are skipped
    pub fn get_grid(&self, key: &str) -> Vec<&Map<String, JsonValue>> {
        match self.0.get(key) {
            Some(JsonValue::Array(rows)) => rows.iter().filter_map(JsonValue::as_object).collect(),
            _ => Vec::new(),
        }
    }

    /// One column of a grid property, as strings
    pub fn grid_column(&self, key: &str, column: &str) -> Vec<String> {
        self.get_grid(key)
            .into_iter()
            .map(|row| match row.get(column) {
                Some(JsonValue::String(s)) => s.clone(),
                Some(JsonValue::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .collect()
    }

    /// Nested plugin reference, if the property holds one with a class name
    pub fn get_plugin(&self, key: &str) -> Option<PluginRef> {
        let value = self.0.get(key)?.clone();
        serde_json::from_value::<PluginRef>(value)
            .ok()
            .filter(|plugin| !plugin.class_name.trim().is_empty())
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }
}

impl From<Map<String, JsonValue>> for Properties {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

/// Reference to a registered plugin together with its configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRef {
    pub class_name: String,

    #[serde(default)]
    pub properties: Properties,
}

impl PluginRef {
    pub fn new(class_name: impl Into<String>, properties: Properties) -> Self {
        Self {
            class_name: class_name.into(),
            properties,
        }
    }
}
