//! The structured document representation and shared field extractors.

use glam::Vec3;
use serde_json::Value;

use crate::error::DecodeError;

/// Structured document stored under a single key.
pub type Document = serde_json::Value;

pub(crate) fn req<'a>(doc: &'a Document, field: &'static str) -> Result<&'a Value, DecodeError> {
    doc.get(field).ok_or(DecodeError::MissingField(field))
}

pub(crate) fn req_str(doc: &Document, field: &'static str) -> Result<String, DecodeError> {
    req(doc, field)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| DecodeError::invalid(field, "expected a string"))
}

/// Absent or null optional string fields decode as the empty string.
pub(crate) fn opt_str(doc: &Document, field: &'static str) -> Result<String, DecodeError> {
    match doc.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DecodeError::invalid(field, "expected a string")),
    }
}

pub(crate) fn req_i32(doc: &Document, field: &'static str) -> Result<i32, DecodeError> {
    req(doc, field)?
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| DecodeError::invalid(field, "expected an integer"))
}

/// A 3-D point must decode from exactly 3 numeric components.
pub(crate) fn req_vec3(doc: &Document, field: &'static str) -> Result<Vec3, DecodeError> {
    let arr = req(doc, field)?
        .as_array()
        .ok_or_else(|| DecodeError::invalid(field, "expected an array of 3 numbers"))?;
    if arr.len() != 3 {
        return Err(DecodeError::invalid(field, "expected exactly 3 components"));
    }
    let mut xyz = [0.0f32; 3];
    for (slot, value) in xyz.iter_mut().zip(arr) {
        *slot = value
            .as_f64()
            .ok_or_else(|| DecodeError::invalid(field, "expected numeric components"))?
            as f32;
    }
    Ok(Vec3::from_array(xyz))
}

/// Absent optional string lists decode as empty.
pub(crate) fn opt_str_list(doc: &Document, field: &'static str) -> Result<Vec<String>, DecodeError> {
    let Some(value) = doc.get(field) else {
        return Ok(Vec::new());
    };
    value
        .as_array()
        .ok_or_else(|| DecodeError::invalid(field, "expected an array of strings"))?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_owned)
                .ok_or_else(|| DecodeError::invalid(field, "expected string elements"))
        })
        .collect()
}

pub(crate) fn opt_f32(
    doc: &Document,
    field: &'static str,
    default: f32,
) -> Result<f32, DecodeError> {
    match doc.get(field) {
        None => Ok(default),
        Some(value) => value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| DecodeError::invalid(field, "expected a number")),
    }
}
