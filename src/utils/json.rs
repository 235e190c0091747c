//! JSON helpers
//!
//! Thin conveniences over `serde_json::Value`: parsing, pretty printing with
//! a chosen indent, file I/O, forgiving typed getters, dot-path lookups and
//! the success/error envelopes printed by the CLI.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{json, Value};
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// JSON errors
#[derive(Error, Debug)]
pub enum JsonError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Parse a JSON document from text
pub fn parse_from_string(text: &str) -> Result<Value, JsonError> {
    serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse JSON: {}", e);
        JsonError::ParseError(e)
    })
}

/// Serialize with `indent` spaces per nesting level
pub fn to_pretty_string(value: &Value, indent: usize) -> Result<String, JsonError> {
    let indent_bytes = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent_bytes));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize on a single line
pub fn to_compact_string(value: &Value) -> Result<String, JsonError> {
    Ok(serde_json::to_string(value)?)
}

pub fn is_valid_json(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok()
}

/// Load a JSON document from disk
pub fn load_from_file(path: &Path) -> Result<Value, JsonError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Write a JSON document to disk, replacing any existing file
pub fn save_to_file(value: &Value, path: &Path, indent: usize) -> Result<(), JsonError> {
    let text = to_pretty_string(value, indent)?;
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// String field of an object, or `default` if absent or not a string
pub fn get_string(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Integer field of an object, or `default` if absent or not an integer
pub fn get_int(value: &Value, key: &str, default: i64) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(default)
}

/// Boolean field of an object, or `default` if absent or not a boolean
pub fn get_bool(value: &Value, key: &str, default: bool) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Non-empty segments of a dot-separated path
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|part| !part.is_empty())
}

/// Borrow the value at a dot-separated path
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    split_path(path).try_fold(value, |current, part| current.get(part))
}

/// Value at a dot-separated path such as `"logging.level"`, `Null` if missing
pub fn get_nested_value(value: &Value, path: &str) -> Value {
    lookup(value, path).cloned().unwrap_or(Value::Null)
}

pub fn has_key(value: &Value, key: &str) -> bool {
    value.get(key).is_some()
}

pub fn has_nested_key(value: &Value, path: &str) -> bool {
    !get_nested_value(value, path).is_null()
}

/// Fail on the first field of `required` missing from `value`
pub fn validate_required_fields(value: &Value, required: &[&str]) -> Result<(), JsonError> {
    match required.iter().find(|field| !has_key(value, field)) {
        Some(field) => Err(JsonError::MissingField(field.to_string())),
        None => Ok(()),
    }
}

fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Envelope for a failed operation
pub fn error_response(code: i64, message: &str, details: Option<&str>) -> Value {
    let mut response = json!({
        "success": false,
        "error": {
            "code": code,
            "message": message,
        },
        "timestamp": current_timestamp(),
    });
    if let Some(details) = details.filter(|d| !d.is_empty()) {
        response["error"]["details"] = Value::from(details);
    }
    response
}

/// Envelope for a successful operation
pub fn success_response(data: Value, message: &str) -> Value {
    json!({
        "success": true,
        "message": message,
        "data": data,
        "timestamp": current_timestamp(),
    })
}
