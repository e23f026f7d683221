//! Classes, interfaces and type literals with properties.
use serde_json::{Map, Value};
use tracing::warn;

use super::{Classifier, Context, UnionKeyword};
use crate::definition::Definition;
use crate::error::Result;
use crate::literal;
use crate::program::SymbolId;

impl<'p> Classifier<'p> {
    pub(super) fn object_definition(&mut self, props: &'p [SymbolId], def: &mut Definition) -> Result<()> {
        let program = self.program;
        let mut properties = Map::new();
        let mut order: Vec<String> = Vec::with_capacity(props.len());
        let mut required: Vec<String> = Vec::new();

        for prop_id in props {
            let prop = program.symbol(prop_id)?;
            let Some(prop_def) = self.property_definition(prop_id)? else { continue };
            properties.insert(prop.name.clone(), prop_def.into_value());
            order.push(prop.name.clone());
            if !prop.is_optional && !prop.is_method && !self.may_be_absent.contains(prop_id) {
                required.push(prop.name.clone());
            }
        }

        if !def.has_type() {
            def.set_type("object");
        }
        if !properties.is_empty() {
            def.insert("properties", properties);
        }
        if self.options.use_default_properties {
            def.insert("defaultProperties", Vec::<Value>::new());
        }
        if self.options.disable_extra_properties && !def.contains("additionalProperties") {
            def.insert("additionalProperties", false);
        }
        if self.options.use_property_order {
            def.insert("propertyOrder", order);
        }
        if self.options.generate_required && !required.is_empty() {
            required.sort();
            required.dedup();
            def.insert("required", required);
        }
        Ok(())
    }

    /// Definition of one property, `None` when it is annotated `@ignore`.
    pub(super) fn property_definition(&mut self, prop_id: &'p SymbolId) -> Result<Option<Definition>> {
        let program = self.program;
        let prop = program.symbol(prop_id)?;
        let decl = program.first_declaration(prop_id)?;

        let Some(ty) = prop.type_.as_ref() else {
            warn!(property = %prop.name, "property has no type; leaving it unconstrained");
            return Ok(Some(Definition::new()));
        };
        let reffed = match decl.and_then(|d| d.type_reference.as_ref()) {
            Some(reference) => Some(program.resolve_alias(reference)?),
            None => None,
        };

        let ctx = Context {
            as_ref: self.options.use_ref,
            union_keyword: UnionKeyword::OneOf,
            prop: Some(prop_id),
            reffed,
        };
        let mut def = self.type_definition(ty, ctx)?;
        if def.is_ignored() {
            return Ok(None);
        }

        if let Some(initializer) = decl.and_then(|d| d.initializer.as_ref()) {
            match literal::evaluate(initializer) {
                Ok(Some(value)) => def.insert("default", value),
                Ok(None) => {}
                Err(err) => {
                    warn!(property = %prop.name, initializer = %initializer.text, %err, "skipping default value");
                }
            }
        }
        Ok(Some(def))
    }
}
