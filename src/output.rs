//! Schema serialization.
use std::io;
use std::path::Path;

use serde_json::{Map, Value};

use crate::definition::Definition;

/// Recursively orders object keys.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect::<Map<_, _>>())
        }
        Value::Array(xs) => Value::Array(xs.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Key-sorted, two-space indented JSON with a trailing newline.
pub fn to_pretty_string(schema: &Definition) -> serde_json::Result<String> {
    let sorted = sort_keys(schema.clone().into_value());
    let mut src = serde_json::to_string_pretty(&sorted)?;
    src.push('\n');
    Ok(src)
}

/// Writes to `out` (parent directories created) or stdout.
pub fn write_schema(schema: &Definition, out: Option<&Path>) -> io::Result<()> {
    let src = to_pretty_string(schema)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, src)
        }
        None => {
            print!("{src}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_at_every_level() {
        let schema: Definition = serde_json::from_value(json!({
            "type": "object",
            "$schema": "x",
            "properties": {"b": {"type": "string"}, "a": {"type": "number", "enum": [2, 1]}},
        }))
        .unwrap();
        let src = to_pretty_string(&schema).unwrap();
        assert_eq!(src, concat!(
            "{\n",
            "  \"$schema\": \"x\",\n",
            "  \"properties\": {\n",
            "    \"a\": {\n",
            "      \"enum\": [\n",
            "        2,\n",
            "        1\n",
            "      ],\n",
            "      \"type\": \"number\"\n",
            "    },\n",
            "    \"b\": {\n",
            "      \"type\": \"string\"\n",
            "    }\n",
            "  },\n",
            "  \"type\": \"object\"\n",
            "}\n",
        ));
    }

    #[test]
    fn writes_into_missing_directories() {
        let dir = std::env::temp_dir().join(format!("ts-jsonschema-out-{}", std::process::id()));
        let path = dir.join("nested").join("schema.json");
        let schema: Definition = serde_json::from_value(json!({"type": "string"})).unwrap();
        write_schema(&schema, Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\n  \"type\": \"string\"\n}\n");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
