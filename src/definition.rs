//! The schema fragment produced for one type or property.
//!
//! A `Definition` is an insertion-ordered JSON object. The engine reads and
//! writes the keywords it understands through the typed helpers below;
//! anything else (user validation keywords, `context.keyword` sub-objects)
//! rides along untouched.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";
pub const DEFINITIONS_POINTER: &str = "#/definitions/";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Definition(Map<String, Value>);

impl Definition {
    pub fn new() -> Self { Self::default() }

    /// `{"$ref": "#/definitions/<name>"}`
    pub fn reference(name: &str) -> Self {
        let mut d = Self::new();
        d.insert("$ref", format!("{DEFINITIONS_POINTER}{name}"));
        d
    }

    pub fn of_type(tag: &str) -> Self {
        let mut d = Self::new();
        d.set_type(tag);
        d
    }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> { self.0.get_mut(key) }
    pub fn contains(&self, key: &str) -> bool { self.0.contains_key(key) }
    pub fn len(&self) -> usize { self.0.len() }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Copies every key of `other` over this definition; `other` wins.
    pub fn merge(&mut self, other: Definition) {
        for (k, v) in other.0 {
            self.0.insert(k, v);
        }
    }

    pub fn into_value(self) -> Value { Value::Object(self.0) }

    // ---- type tag ----

    pub fn type_tag(&self) -> Option<&Value> { self.0.get("type") }

    pub fn has_type(&self) -> bool { self.0.contains_key("type") }

    pub fn set_type(&mut self, tag: &str) {
        self.insert("type", tag);
    }

    /// Single string for one tag, list otherwise.
    pub fn set_types(&mut self, tags: Vec<String>) {
        match tags.len() {
            0 => {}
            1 => self.insert("type", tags.into_iter().next().unwrap_or_default()),
            _ => self.insert("type", tags),
        }
    }

    /// `Some(tag)` when the definition is exactly `{"type": "<tag>"}`.
    pub fn bare_type(&self) -> Option<&str> {
        if self.0.len() != 1 { return None; }
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn is_ignored(&self) -> bool { self.0.contains_key("ignore") }

    // ---- nullable transform ----

    /// Widen this definition so that `null` also validates.
    ///
    /// A plain `type` (optionally described) absorbs `"null"`, else a null
    /// branch is appended to `oneOf`/`anyOf`, else every key moves into
    /// `anyOf[0]` next to a null branch.
    pub fn make_nullable(&mut self) {
        let only_typed = self.0.keys().all(|k| k == "type" || k == "description");
        if let Some(slot) = self.0.get_mut("type").filter(|_| only_typed) {
            match slot {
                Value::String(tag) => {
                    if tag != "null" {
                        let tag = std::mem::take(tag);
                        *slot = Value::from(vec![tag, "null".to_string()]);
                    }
                    return;
                }
                Value::Array(tags) => {
                    if !tags.iter().any(|t| t == "null") {
                        tags.push(Value::from("null"));
                    }
                    return;
                }
                _ => {}
            }
        }

        let null_branch = Definition::of_type("null").into_value();
        let union_key = ["oneOf", "anyOf"].into_iter().find(|k| matches!(self.0.get(*k), Some(Value::Array(_))));
        if let Some(Value::Array(branches)) = union_key.and_then(|k| self.0.get_mut(k)) {
            if !branches.iter().any(|b| b.get("type").and_then(Value::as_str) == Some("null")) {
                branches.push(null_branch);
            }
            return;
        }

        let original = std::mem::take(&mut self.0);
        self.insert("anyOf", vec![Value::Object(original), null_branch]);
    }
}

impl From<Definition> for Value {
    fn from(d: Definition) -> Self { d.into_value() }
}

// ————————————————————————————————————————————————————————————————————————————
// LITERAL VALUES
// ————————————————————————————————————————————————————————————————————————————

/// JSON-schema primitive name of a literal value.
pub fn primitive_type_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Removes repeats (first occurrence wins) and orders values the way a plain
/// `Array.prototype.sort()` does: by their string conversion, compared by
/// UTF-16 code units. `[10, 9, 1]` becomes `[1, 10, 9]`.
pub fn sort_enum_values(values: &mut Vec<Value>) {
    let mut unique: Vec<Value> = Vec::with_capacity(values.len());
    for v in values.drain(..) {
        if !unique.contains(&v) {
            unique.push(v);
        }
    }
    unique.sort_by(|a, b| js_sort_cmp(a, b));
    *values = unique;
}

fn js_sort_cmp(a: &Value, b: &Value) -> Ordering {
    let (a, b) = (js_string(a), js_string(b));
    a.encode_utf16().cmp(b.encode_utf16())
}

fn js_string(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                js_number_string(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::Array(xs) => xs.iter().map(js_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// `Number.prototype.toString()`: positional between 1e-6 and 1e21,
/// exponent form (`1e-7`, `1.5e+21`) outside.
fn js_number_string(f: f64) -> String {
    if !f.is_finite() {
        return if f.is_nan() { "NaN".to_string() } else if f > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        if f.fract() == 0.0 { format!("{f:.0}") } else { f.to_string() }
    } else {
        let exp = format!("{f:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
