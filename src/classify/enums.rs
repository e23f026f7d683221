//! Enum declarations.
use serde_json::Value;
use tracing::warn;

use crate::definition::{primitive_type_of, sort_enum_values, Definition};
use crate::literal;
use crate::program::Declaration;

/// `type` is the set of member value types, `enum` the sorted member values.
/// Members whose value the checker could not compute fall back to their
/// literal initializer.
pub fn enum_definition(decl: &Declaration, def: &mut Definition) {
    let mut values: Vec<Value> = Vec::with_capacity(decl.enum_members.len());

    for member in &decl.enum_members {
        if let Some(value) = &member.constant_value {
            values.push(value.clone());
            continue;
        }
        let Some(initializer) = &member.initializer else {
            warn!(member = %member.name, "enum member has no value");
            continue;
        };
        match literal::evaluate(initializer) {
            Ok(Some(value @ (Value::String(_) | Value::Bool(_) | Value::Number(_) | Value::Null))) => values.push(value),
            Ok(None) => warn!(member = %member.name, "enum member is undefined"),
            Ok(Some(_)) => warn!(member = %member.name, "enum member value is not a scalar"),
            Err(err) => warn!(member = %member.name, %err, "enum member value is not a literal"),
        }
    }

    let mut types: Vec<String> = Vec::new();
    for value in &values {
        let tag = primitive_type_of(value);
        if !types.iter().any(|t| t == tag) {
            types.push(tag.to_string());
        }
    }
    def.set_types(types);

    if !values.is_empty() {
        sort_enum_values(&mut values);
        def.insert("enum", values);
    }
}
