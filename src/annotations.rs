//! Documentation-comment annotations.
//!
//! A comment like
//!
//! ```text
//! The user's age.
//! @minimum 0
//! @TJS-type integer
//! @items.maximum 10
//! @nullable
//! ```
//!
//! splits into a description (`The user's age.`), validation keywords
//! (`minimum`, `type`, and `maximum` nested under `items`) and "other"
//! annotation names (`nullable`) that the classifier interprets itself.
use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::definition::Definition;
use crate::program::DocTag;

/// Annotation names written straight into a definition.
pub const BUILTIN_KEYWORDS: &[&str] = &[
    "ignore",
    "description",
    "type",
    "minimum",
    "exclusiveMinimum",
    "maximum",
    "exclusiveMaximum",
    "multipleOf",
    "minLength",
    "maxLength",
    "format",
    "pattern",
    "minItems",
    "maxItems",
    "uniqueItems",
    "default",
    "additionalProperties",
    "enum",
];

const VENDOR_PREFIX: &str = "TJS-";

static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(?:TJS-)?([A-Za-z_][\w.\-]*)\s*([^@]*)").expect("annotation regex")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub description: Option<String>,
    /// Recognized keywords, in the order they appeared.
    pub keywords: Map<String, Value>,
    /// Tag names outside the keyword set, e.g. `nullable`.
    pub other: BTreeSet<String>,
}

impl Annotations {
    pub fn is_ignored(&self) -> bool { self.keywords.contains_key("ignore") }

    pub fn is_nullable(&self) -> bool { self.other.contains("nullable") }

    /// Writes description and keywords into `def`. Sub-objects produced by
    /// dotted keywords merge into an existing object of the same name.
    pub fn apply_to(&self, def: &mut Definition) {
        if let Some(description) = &self.description {
            def.insert("description", description.clone());
        }
        for (k, v) in &self.keywords {
            match (def.get_mut(k), v) {
                (Some(Value::Object(existing)), Value::Object(nested)) => {
                    for (nk, nv) in nested {
                        existing.insert(nk.clone(), nv.clone());
                    }
                }
                _ => def.insert(k.clone(), v.clone()),
            }
        }
    }
}

/// Annotation parser configured with the caller's extra keywords.
#[derive(Debug, Clone, Default)]
pub struct AnnotationParser {
    extra: HashSet<String>,
}

impl AnnotationParser {
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { extra: extra.into_iter().map(Into::into).collect() }
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        BUILTIN_KEYWORDS.contains(&name) || self.extra.contains(name)
    }

    /// Parse one raw comment block.
    pub fn parse(&self, comment: &str) -> Annotations {
        let mut out = Annotations::default();

        let (head, rest) = match comment.find('@') {
            Some(i) => comment.split_at(i),
            None => (comment, ""),
        };
        let head = head.trim_end();
        if !head.is_empty() {
            out.description = Some(head.to_string());
        }

        for cap in ANNOTATION.captures_iter(rest) {
            let name = cap.get(1).map_or("", |m| m.as_str());
            let text = cap.get(2).map(|m| m.as_str());
            self.apply(&mut out, name, text);
        }
        out
    }

    /// Annotations of a symbol: the documentation comment first, then its
    /// structured doc tags.
    pub fn parse_symbol(&self, documentation: &[String], tags: &[DocTag]) -> Annotations {
        let comment = documentation
            .iter()
            .map(|part| part.trim().replace("\r\n", "\n"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut out = self.parse(&comment);
        for tag in tags {
            match (tag.name.as_str(), tag.text.as_deref()) {
                // `@TJS-type integer` may arrive as tag `TJS` with text `-type integer`
                ("TJS", Some(text)) if text.starts_with('-') => {
                    let text = &text[1..];
                    let (name, value) = match text.find(char::is_whitespace) {
                        Some(i) => (&text[..i], Some(&text[i..])),
                        None => (text, None),
                    };
                    self.apply(&mut out, name, value);
                }
                (name, text) => {
                    let name = name.strip_prefix(VENDOR_PREFIX).unwrap_or(name);
                    self.apply(&mut out, name, text);
                }
            }
        }
        out
    }

    fn apply(&self, out: &mut Annotations, name: &str, text: Option<&str>) {
        let path: Vec<&str> = name.split('.').filter(|s| !s.is_empty()).collect();
        let Some(keyword) = path.last() else { return };

        if !self.is_keyword(keyword) {
            out.other.insert(name.to_string());
            return;
        }

        // `items.minimum 1` → key `items`, value `{"minimum": 1}`
        let Some((key, nested)) = path.split_first() else { return };
        let mut value = parse_value(text.unwrap_or(""));
        for segment in nested.iter().rev() {
            let mut m = Map::new();
            m.insert((*segment).to_string(), value);
            value = Value::Object(m);
        }
        if nested.is_empty() {
            out.keywords.insert((*key).to_string(), value);
        } else {
            merge_keyword(&mut out.keywords, (*key).to_string(), value);
        }
    }
}

/// Trimmed text parsed as JSON, or the trimmed text itself.
pub fn parse_value(text: &str) -> Value {
    let text = text.trim();
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn merge_keyword(into: &mut Map<String, Value>, key: String, value: Value) {
    match (into.get_mut(&key), value) {
        (Some(Value::Object(existing)), Value::Object(nested)) => {
            for (k, v) in nested {
                merge_keyword(existing, k, v);
            }
        }
        (_, value) => {
            into.insert(key, value);
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parser() -> AnnotationParser { AnnotationParser::default() }

    #[test]
    fn description_is_text_before_first_marker() {
        let a = parser().parse("The age of the user.  \n@minimum 0");
        assert_eq!(a.description.as_deref(), Some("The age of the user."));
        assert_eq!(a.keywords.get("minimum"), Some(&json!(0)));
    }

    #[test]
    fn comment_without_markers_is_all_description() {
        let a = parser().parse("Just words");
        assert_eq!(a.description.as_deref(), Some("Just words"));
        assert!(a.keywords.is_empty());
        assert!(a.other.is_empty());
    }

    #[test]
    fn values_parse_as_json_or_stay_raw() {
        let a = parser().parse("@pattern ^[a-z]+$\n@maxLength 12\n@uniqueItems true\n@default {\"a\": [1, 2]}");
        assert_eq!(a.keywords.get("pattern"), Some(&json!("^[a-z]+$")));
        assert_eq!(a.keywords.get("maxLength"), Some(&json!(12)));
        assert_eq!(a.keywords.get("uniqueItems"), Some(&json!(true)));
        assert_eq!(a.keywords.get("default"), Some(&json!({"a": [1, 2]})));
    }

    #[test]
    fn vendor_prefix_is_stripped() {
        let a = parser().parse("@TJS-type integer\n@TJS-format email");
        assert_eq!(a.keywords.get("type"), Some(&json!("integer")));
        assert_eq!(a.keywords.get("format"), Some(&json!("email")));
    }

    #[test]
    fn dotted_keywords_nest_under_context() {
        let a = parser().parse("@items.type integer\n@items.minimum 1");
        assert_eq!(a.keywords.get("items"), Some(&json!({"type": "integer", "minimum": 1})));
    }

    #[test]
    fn unknown_names_are_reported_as_other() {
        let a = parser().parse("@nullable\n@asType string");
        assert!(a.is_nullable());
        assert!(a.other.contains("asType"));
        assert!(a.keywords.is_empty());
    }

    #[test]
    fn user_keywords_extend_the_builtin_set() {
        let p = AnnotationParser::new(["chance"]);
        let a = p.parse("@chance {\"integer\": {\"min\": 1}}");
        assert_eq!(a.keywords.get("chance"), Some(&json!({"integer": {"min": 1}})));
    }

    #[test]
    fn ignore_is_detected_with_empty_value() {
        let a = parser().parse("internal only\n@ignore");
        assert!(a.is_ignored());
        assert_eq!(a.keywords.get("ignore"), Some(&json!("")));
    }

    #[test]
    fn doc_tags_apply_after_comment_text() {
        let tags = vec![
            DocTag { name: "minimum".into(), text: Some("5".into()) },
            DocTag { name: "TJS".into(), text: Some("-format uri".into()) },
            DocTag { name: "TJS-pattern".into(), text: Some("^x".into()) },
            DocTag { name: "nullable".into(), text: None },
        ];
        let a = parser().parse_symbol(&["  Docs\r\nhere ".into(), "@minimum 1".into()], &tags);
        assert_eq!(a.description.as_deref(), Some("Docs\nhere"));
        assert_eq!(a.keywords.get("minimum"), Some(&json!(5)));
        assert_eq!(a.keywords.get("format"), Some(&json!("uri")));
        assert_eq!(a.keywords.get("pattern"), Some(&json!("^x")));
        assert!(a.is_nullable());
    }

    #[test]
    fn apply_merges_nested_objects_into_definition() {
        let mut def: Definition = serde_json::from_value(json!({"type": "array", "items": {"type": "number"}})).unwrap();
        parser().parse("A list\n@items.minimum 0\n@maxItems 3").apply_to(&mut def);
        assert_eq!(def.into_value(), json!({
            "type": "array",
            "items": {"type": "number", "minimum": 0},
            "description": "A list",
            "maxItems": 3,
        }));
    }

    #[test]
    fn later_sets_win_on_collision() {
        let mut def = Definition::new();
        parser().parse("first\n@minimum 1\n@items.type string").apply_to(&mut def);
        parser().parse("@minimum 2\n@items.maxLength 4").apply_to(&mut def);
        assert_eq!(def.into_value(), json!({
            "description": "first",
            "minimum": 2,
            "items": {"type": "string", "maxLength": 4},
        }));
    }
}
