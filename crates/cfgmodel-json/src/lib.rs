//! JSON wire provider: converts between JSON text and [`Section`] trees.
//!
//! Round-tripping preserves key order (`serde_json` with `preserve_order`),
//! scalar kind (boolean vs. integer vs. float vs. string), and nesting. The
//! provider performs no file I/O; it converts strings and bytes only.

use std::sync::Arc;

use serde_json::{Map, Number, Value};
use thiserror::Error;

use cfgmodel_core::serializer::SerializerRegistry;
use cfgmodel_core::{ConfigValue, Section};

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("top-level JSON value must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// Stateless JSON provider.
pub struct JsonProvider;

impl JsonProvider {
    /// Parses a JSON object into a section with no registered codecs.
    pub fn load_str(text: &str) -> Result<Section, JsonError> {
        let value: Value = serde_json::from_str(text)?;
        section_from_json(&value, None)
    }

    /// Parses a JSON object into a section resolving codecs through `reg`.
    pub fn load_str_with(text: &str, reg: Arc<SerializerRegistry>) -> Result<Section, JsonError> {
        let value: Value = serde_json::from_str(text)?;
        section_from_json(&value, Some(reg))
    }

    pub fn load_bytes(bytes: &[u8]) -> Result<Section, JsonError> {
        let value: Value = serde_json::from_slice(bytes)?;
        section_from_json(&value, None)
    }

    pub fn save_string(section: &Section) -> String {
        Value::Object(object_from_section(section)).to_string()
    }

    pub fn save_string_pretty(section: &Section) -> String {
        // Pretty printing through serde_json cannot fail for this value shape.
        serde_json::to_string_pretty(&Value::Object(object_from_section(section)))
            .unwrap_or_else(|_| Self::save_string(section))
    }

    pub fn save_bytes(section: &Section) -> Vec<u8> {
        Self::save_string(section).into_bytes()
    }
}

fn section_from_json(
    value: &Value,
    reg: Option<Arc<SerializerRegistry>>,
) -> Result<Section, JsonError> {
    let Value::Object(object) = value else {
        return Err(JsonError::NotAnObject(json_kind(value)));
    };
    Ok(object_to_section(object, reg))
}

fn object_to_section(object: &Map<String, Value>, reg: Option<Arc<SerializerRegistry>>) -> Section {
    let mut section = match &reg {
        Some(reg) => Section::with_registry(reg.clone()),
        None => Section::new(),
    };
    for (key, value) in object {
        // A null member maps to ConfigValue::Null, which `set` drops; null
        // object members therefore vanish on load, matching the value tree's
        // removal semantics. Nulls inside arrays are kept.
        section.set(key.clone(), node_from_json(value, reg.as_ref()));
    }
    section
}

fn node_from_json(value: &Value, reg: Option<&Arc<SerializerRegistry>>) -> ConfigValue {
    match value {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigValue::Integer(i)
            } else {
                ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => ConfigValue::String(s.clone()),
        Value::Array(items) => ConfigValue::List(
            items
                .iter()
                .map(|item| node_from_json(item, reg))
                .collect(),
        ),
        Value::Object(object) => ConfigValue::Section(object_to_section(object, reg.cloned())),
    }
}

fn object_from_section(section: &Section) -> Map<String, Value> {
    section
        .entries()
        .map(|(key, node)| (key.to_string(), node_to_json(node)))
        .collect()
}

fn node_to_json(node: &ConfigValue) -> Value {
    match node {
        ConfigValue::Null => Value::Null,
        ConfigValue::Bool(b) => Value::Bool(*b),
        ConfigValue::Integer(i) => Value::Number(Number::from(*i)),
        ConfigValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        ConfigValue::String(s) => Value::String(s.clone()),
        ConfigValue::List(items) => Value::Array(items.iter().map(node_to_json).collect()),
        ConfigValue::Section(section) => Value::Object(object_from_section(section)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
