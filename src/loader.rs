//! Loading updates collections and checking their shape
//!
//! Update data arrives either as a file (YAML or JSON) or as a template value
//! handed to a filter. Both paths go through [`updates_from_value`], which
//! rejects anything that is not a mapping of mappings before deserializing.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::update::{CategorizedUpdates, CategoryMatch, UpdateRecord, Updates};

/// Load an updates collection from a `.yaml`, `.yml` or `.json` file
///
/// Files with any other extension are parsed as YAML.
pub fn load_updates(path: &Path) -> Result<Updates> {
    let content = fs::read_to_string(path)?;

    let updates = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => parse_updates_json(&content)?,
        _ => parse_updates_yaml(&content)?,
    };

    debug!("Loaded {} updates from {}", updates.len(), path.display());
    Ok(updates)
}

pub fn parse_updates_yaml(content: &str) -> Result<Updates> {
    let value: Value = serde_yaml::from_str(content)?;
    updates_from_value(value)
}

pub fn parse_updates_json(content: &str) -> Result<Updates> {
    let value: Value = serde_json::from_str(content)?;
    updates_from_value(value)
}

/// Convert a mapping of update id to record into [`Updates`]
pub fn updates_from_value(value: Value) -> Result<Updates> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(Error::Shape(format!(
                "updates must be a mapping of update id to record, got {}",
                type_name(&other)
            )))
        }
    };

    let mut updates = Updates::with_capacity(map.len());
    for (id, record) in map {
        let record = record_from_value(&id, record)?;
        updates.insert(id, record);
    }

    Ok(updates)
}

/// Convert a mapping of category name to `[id, record]` pairs into
/// [`CategorizedUpdates`]
pub fn categorized_from_value(value: Value) -> Result<CategorizedUpdates> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(Error::Shape(format!(
                "categorized updates must be a mapping of category name to matches, got {}",
                type_name(&other)
            )))
        }
    };

    let mut categorized = CategorizedUpdates::with_capacity(map.len());
    for (category, matches) in map {
        let items = match matches {
            Value::Array(items) => items,
            other => {
                return Err(Error::Shape(format!(
                    "matches for category '{category}' must be a list, got {}",
                    type_name(&other)
                )))
            }
        };

        let matches = items
            .into_iter()
            .map(|item| match_from_value(&category, item))
            .collect::<Result<Vec<_>>>()?;
        categorized.insert(category, matches);
    }

    Ok(categorized)
}

fn match_from_value(category: &str, item: Value) -> Result<CategoryMatch> {
    let pair = match item {
        Value::Array(pair) if pair.len() == 2 => pair,
        other => {
            return Err(Error::Shape(format!(
                "match in category '{category}' must be an [id, record] pair, got {}",
                type_name(&other)
            )))
        }
    };

    let mut pair = pair.into_iter();
    let (id, record) = match (pair.next(), pair.next()) {
        (Some(Value::String(id)), Some(record)) => (id, record),
        _ => {
            return Err(Error::Shape(format!(
                "match in category '{category}' must start with a string id"
            )))
        }
    };

    let record = record_from_value(&id, record)?;
    Ok((id, record))
}

fn record_from_value(id: &str, value: Value) -> Result<UpdateRecord> {
    if !value.is_object() {
        return Err(Error::Shape(format!(
            "update '{id}' must be a mapping, got {}",
            type_name(&value)
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::Shape(format!("update '{id}' has invalid fields: {e}")))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
