//! Root types: primitives, literals, arrays, `Date`, `object`.
use serde_json::{Number, Value};

use super::{Classifier, Shape};
use crate::definition::{primitive_type_of, Definition};
use crate::error::Result;
use crate::program::{SymbolId, TypeKind, TypeNode};

impl<'p> Classifier<'p> {
    pub(super) fn root_shape(&self, node: &'p TypeNode, reffed: Option<&'p SymbolId>) -> Result<Shape<'p>> {
        if let Some(value) = literal_value(node) {
            return Ok(Shape::Literal(value));
        }
        let own_name = match node.symbol.as_ref() {
            Some(id) => Some(self.program.symbol(id)?.name.as_str()),
            None => None,
        };
        let shape = match &node.kind {
            TypeKind::String => Shape::Primitive("string"),
            TypeKind::Number => {
                let reffed_name = match reffed {
                    Some(id) => Some(self.program.symbol(id)?.name.as_str()),
                    None => None,
                };
                if own_name == Some("integer") || reffed_name == Some("integer") {
                    Shape::Primitive("integer")
                } else {
                    Shape::Primitive("number")
                }
            }
            TypeKind::Boolean => Shape::Primitive("boolean"),
            TypeKind::Null => Shape::Primitive("null"),
            TypeKind::Undefined => Shape::Primitive("undefined"),
            TypeKind::Any | TypeKind::Unknown => Shape::Unconstrained,
            TypeKind::NonPrimitive => Shape::NonPrimitive,
            TypeKind::Object(obj) => match own_name {
                Some("Date") => Shape::Date,
                Some("Array" | "ReadonlyArray") => match obj.type_arguments.first().or(obj.number_index.as_ref()) {
                    Some(element) => Shape::Array(element),
                    None => Shape::Unsupported,
                },
                _ => match obj.number_index.as_ref() {
                    Some(element) => Shape::Array(element),
                    None => Shape::Unsupported,
                },
            },
            _ => Shape::Unsupported,
        };
        Ok(shape)
    }
}

/// Value of a literal type, or `None` for anything else.
pub fn literal_value(node: &TypeNode) -> Option<Value> {
    match &node.kind {
        TypeKind::StringLiteral { value } => Some(Value::String(value.clone())),
        TypeKind::NumberLiteral { value } => Some(number_value(*value)),
        TypeKind::BooleanLiteral { value } => Some(Value::Bool(*value)),
        TypeKind::EnumLiteral { value } => Some(match value {
            Value::Number(n) => n.as_f64().map_or(Value::Null, number_value),
            other => other.clone(),
        }),
        _ => None,
    }
}

/// Whole numbers stay integers in the output (`1`, not `1.0`).
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.007_199_254_740_992e15 {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

pub fn literal_definition(value: Value, def: &mut Definition) {
    def.set_type(primitive_type_of(&value));
    def.insert("enum", vec![value]);
}
