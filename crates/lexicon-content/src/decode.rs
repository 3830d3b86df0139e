//! Structured leaf decoding to a uniform JSON value representation

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::Format;

/// Decode a structured leaf file to a `serde_json::Value`.
///
/// TOML and YAML documents are converted to the JSON data model so the
/// tree layer deals with a single value currency. Malformed content is a
/// fatal [`Error::Parse`]; a well-formed document that is not a mapping is
/// returned as decoded and left to the caller to reject.
pub fn decode_file(path: &Path, format: Format) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    match format {
        Format::Json => serde_json::from_str(&content)
            .map_err(|e| Error::parse(path, format.name(), e.to_string())),
        Format::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| Error::parse(path, format.name(), e.to_string())),
        Format::Toml => {
            let value: toml::Value = toml::from_str(&content)
                .map_err(|e| Error::parse(path, format.name(), e.to_string()))?;
            Ok(toml_to_json(value))
        }
        Format::RawText => Err(Error::parse(
            path,
            format.name(),
            "raw text leaves carry no structured content",
        )),
    }
}

/// Read a raw text leaf verbatim.
pub fn read_raw(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Convert a `toml::Value` to a `serde_json::Value`
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let mut map = serde_json::Map::new();
            for (key, item) in table {
                map.insert(key, toml_to_json(item));
            }
            Value::Object(map)
        }
    }
}
