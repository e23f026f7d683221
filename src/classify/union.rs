//! Union reduction.
//!
//! Members are sorted into three buckets: literal values (collected into one
//! `enum`), bare primitive tags (collected into one `type`), and everything
//! else. A single surviving entry is merged flat; several go under
//! `oneOf`/`anyOf`. `undefined` members are dropped and mark the owning
//! property as possibly absent.
use serde_json::Value;
use tracing::warn;

use super::root::literal_value;
use super::{Classifier, Context};
use crate::definition::{primitive_type_of, sort_enum_values, Definition};
use crate::error::Result;
use crate::program::TypeId;

impl<'p> Classifier<'p> {
    pub(super) fn union_definition(&mut self, types: &'p [TypeId], ctx: Context<'p>, def: &mut Definition) -> Result<()> {
        let program = self.program;
        let mut enum_values: Vec<Value> = Vec::new();
        let mut simple_types: Vec<String> = Vec::new();
        let mut schemas: Vec<Definition> = Vec::new();

        for member in types {
            if let Some(value) = literal_value(program.type_node(member)?) {
                if !enum_values.contains(&value) {
                    enum_values.push(value);
                }
                continue;
            }

            let member_def = self.type_definition(member, self.nested())?;
            match member_def.bare_type() {
                Some("undefined") => {
                    if let Some(prop) = ctx.prop {
                        self.may_be_absent.insert(prop.clone());
                    }
                }
                Some(tag) => {
                    if !simple_types.iter().any(|t| t == tag) {
                        simple_types.push(tag.to_string());
                    }
                }
                None => {
                    if member_def.len() == 1 && member_def.type_tag().is_some_and(Value::is_array) {
                        warn!(member = %member, "union member already lists several types");
                    }
                    schemas.push(member_def);
                }
            }
        }

        let is_boolean_pair = enum_values.len() == 2
            && enum_values.iter().all(Value::is_boolean)
            && enum_values[0] != enum_values[1];
        if is_boolean_pair {
            if !simple_types.iter().any(|t| t == "boolean") {
                simple_types.push("boolean".to_string());
            }
        } else if !enum_values.is_empty() {
            sort_enum_values(&mut enum_values);
            let mut enum_schema = Definition::new();
            let first = primitive_type_of(&enum_values[0]);
            if matches!(first, "string" | "number" | "boolean")
                && enum_values.iter().all(|v| primitive_type_of(v) == first)
            {
                enum_schema.set_type(first);
            }
            enum_schema.insert("enum", enum_values);
            schemas.push(enum_schema);
        }

        if !simple_types.is_empty() {
            let mut simple = Definition::new();
            simple.set_types(simple_types);
            schemas.push(simple);
        }

        match schemas.len() {
            0 => {}
            1 => {
                if let Some(only) = schemas.pop() {
                    def.merge(only);
                }
            }
            _ => {
                let branches: Vec<Value> = schemas.into_iter().map(Definition::into_value).collect();
                def.insert(ctx.union_keyword.as_str(), branches);
            }
        }
        Ok(())
    }
}
