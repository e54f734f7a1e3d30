//! JSCoverage JSON format reader
//!
//! The input is an object keyed by file path. Each value is an object whose
//! `coverage` array holds one entry per source line: `null` for lines that
//! cannot execute, otherwise the hit count. Other per-file fields
//! (`source`, `branchData`) are ignored.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::{CoverageInput, LineCoverage};
use crate::error::{ConvertError, Result};

/// Read and validate a JSCoverage JSON file
pub fn read_jscoverage(path: &Path) -> Result<CoverageInput> {
    let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    parse_jscoverage_str(&content)
}

/// Parse JSCoverage JSON content from a string
pub fn parse_jscoverage_str(content: &str) -> Result<CoverageInput> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ConvertError::malformed(format!("invalid JSON: {}", e)))?;
    parse_jscoverage_value(&value)
}

/// Validate an already parsed JSON document
pub fn parse_jscoverage_value(value: &Value) -> Result<CoverageInput> {
    let object = value.as_object().ok_or_else(|| {
        ConvertError::malformed(format!(
            "expected an object keyed by file path, found {}",
            kind(value)
        ))
    })?;

    let mut input = CoverageInput::new();
    for (path, entry) in object {
        let lines = parse_file_entry(path, entry)?;
        input.files.push((path.clone(), lines));
    }

    Ok(input)
}

fn parse_file_entry(path: &str, entry: &Value) -> Result<LineCoverage> {
    let fields: &Map<String, Value> = entry.as_object().ok_or_else(|| {
        ConvertError::malformed(format!(
            "entry for '{}' must be an object, found {}",
            path,
            kind(entry)
        ))
    })?;

    let coverage = match fields.get("coverage") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ConvertError::malformed(format!(
                "'coverage' of '{}' must be an array, found {}",
                path,
                kind(other)
            )))
        }
        None => {
            return Err(ConvertError::malformed(format!(
                "entry for '{}' has no 'coverage' array",
                path
            )))
        }
    };

    coverage
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_hits(item).map_err(|found| {
                ConvertError::malformed(format!(
                    "coverage[{}] of '{}' must be null or a non-negative integer, found {}",
                    index, path, found
                ))
            })
        })
        .collect()
}

/// Coerce one array element; the error carries a description of what was found
fn parse_hits(item: &Value) -> std::result::Result<Option<u64>, String> {
    match item {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(hits) = n.as_u64() {
                return Ok(Some(hits));
            }
            match n.as_f64() {
                // Integral floats such as `2.0`
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => {
                    Ok(Some(f as u64))
                }
                _ => Err(format!("number {}", n)),
            }
        }
        Value::String(s) => Err(format!("string {:?}", s)),
        other => Err(kind(other).to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
