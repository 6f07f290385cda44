use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use super::types::IpoRecord;

/// Parse a JSON document holding one IPO record or an array of them.
///
/// Field-level problems never fail here (see [`IpoRecord`]); only a
/// document that isn't JSON, or whose records aren't objects, is an error.
pub fn parse_records(json: &str) -> Result<Vec<IpoRecord>> {
    let document: Value = serde_json::from_str(json).context("Input is not valid JSON")?;

    match document {
        Value::Object(map) => Ok(vec![IpoRecord::deserialize(Value::Object(map))?]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| -> Result<IpoRecord> {
                if !item.is_object() {
                    bail!("Record {} is not a JSON object", i + 1);
                }
                Ok(IpoRecord::deserialize(item)?)
            })
            .collect(),
        _ => bail!("Input must be a JSON object or an array of objects"),
    }
}

/// Read records from a file, or from stdin when `path` is `None`.
pub fn read_records(path: Option<&Path>) -> Result<Vec<IpoRecord>> {
    let content = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    parse_records(&content)
}
