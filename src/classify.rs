//! Type classifier: program type → schema `Definition`.
//!
//! Every type goes through two steps. `shape_of` looks at the type node, its
//! symbol and first declaration and picks exactly one `Shape` (first match
//! wins: union, intersection, tuple, raw/primitive, enum, empty type literal,
//! then the class/interface family). `infer` then renders that shape.
//!
//! Named types are emitted once into the registry and referenced through
//! `$ref` everywhere else. The registry slot is reserved before the type's
//! content is rendered, so self-referential and diamond-shaped graphs
//! terminate with a single entry per name.
pub mod enums;
pub mod object;
pub mod root;
pub mod union;

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::annotations::{AnnotationParser, Annotations};
use crate::collector::{strip_module_path, SymbolTable};
use crate::definition::Definition;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::program::{Declaration, DeclKind, Member, Program, SymbolId, TypeId, TypeKind, TypeNode};

/// Nesting depth at which classification gives up on unnamed cycles.
const MAX_DEPTH: usize = 200;

/// Symbol names whose types are never referenced, only inlined.
const RAW_SYMBOLS: &[&str] = &["integer", "Array", "ReadonlyArray", "Date"];

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionKeyword {
    OneOf,
    AnyOf,
}

impl UnionKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            UnionKeyword::OneOf => "oneOf",
            UnionKeyword::AnyOf => "anyOf",
        }
    }
}

/// Where a type is being classified from.
#[derive(Debug, Clone, Copy)]
pub struct Context<'p> {
    /// Emit a `$ref` when the type is eligible for one.
    pub as_ref: bool,
    pub union_keyword: UnionKeyword,
    /// Property whose declared type this is.
    pub prop: Option<&'p SymbolId>,
    /// Symbol named by the property's type annotation (usually an alias).
    pub reffed: Option<&'p SymbolId>,
}

impl<'p> Context<'p> {
    pub fn new(as_ref: bool) -> Self {
        Self { as_ref, union_keyword: UnionKeyword::OneOf, prop: None, reffed: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKey {
    String,
    Number,
}

/// Structural category of a type, decided once per classification.
#[derive(Debug, Clone)]
pub enum Shape<'p> {
    Union(&'p [TypeId]),
    Intersection(&'p [TypeId]),
    Tuple(&'p [TypeId]),
    Primitive(&'static str),
    Literal(Value),
    Array(&'p TypeId),
    Date,
    NonPrimitive,
    Unconstrained,
    Unsupported,
    Enum(&'p Declaration),
    EmptyObject,
    Function,
    Map { key: IndexKey, value: &'p TypeId },
    Abstract,
    Object(&'p [SymbolId]),
}

pub struct Classifier<'p> {
    program: &'p Program,
    options: &'p Options,
    symbols: &'p SymbolTable,
    annotations: AnnotationParser,
    registry: IndexMap<String, Definition>,
    /// Properties whose union type included `undefined`.
    may_be_absent: HashSet<SymbolId>,
    depth: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl<'p> Classifier<'p> {
    pub fn new(program: &'p Program, options: &'p Options, symbols: &'p SymbolTable) -> Self {
        Self {
            program,
            options,
            symbols,
            annotations: AnnotationParser::new(options.validation_keywords.iter().cloned()),
            registry: IndexMap::new(),
            may_be_absent: HashSet::new(),
            depth: 0,
        }
    }

    pub fn registry(&self) -> &IndexMap<String, Definition> { &self.registry }

    pub fn into_registry(self) -> IndexMap<String, Definition> { self.registry }

    /// Context for a nested type that has no property of its own.
    fn nested(&self) -> Context<'p> { Context::new(self.options.use_ref) }

    pub fn type_definition(&mut self, ty: &'p TypeId, ctx: Context<'p>) -> Result<Definition> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::RecursionLimit(self.program.type_node(ty)?.name.clone()));
        }
        self.depth += 1;
        let out = self.type_definition_inner(ty, ctx);
        self.depth -= 1;
        out
    }

    fn type_definition_inner(&mut self, ty: &'p TypeId, ctx: Context<'p>) -> Result<Definition> {
        let program = self.program;
        let node = program.type_node(ty)?;
        let symbol = node.symbol.as_ref().map(|s| program.symbol(s)).transpose()?;

        let is_raw = symbol.is_none_or(|s| RAW_SYMBOLS.contains(&s.name.as_str()));
        let is_string_enum = matches!(&node.kind, TypeKind::Union { types } if types.iter().all(|t| {
            matches!(program.types.get(t).map(|n| &n.kind), Some(TypeKind::StringLiteral { .. }))
        }));
        let is_anonymous = matches!(&node.kind, TypeKind::Object(obj) if obj.anonymous);

        let as_alias_ref = ctx.as_ref
            && ctx.reffed.is_some()
            && (self.options.use_type_alias_ref || is_string_enum);
        let as_ref = ctx.as_ref && (as_alias_ref || !(is_raw || is_anonymous));

        let full_name = match (as_alias_ref, ctx.reffed) {
            (true, Some(reffed)) => strip_module_path(&program.symbol(reffed)?.qualified_name),
            _ if as_ref => strip_module_path(&node.name),
            _ => String::new(),
        };

        // comments: alias declaration, then property, then the type's own symbol
        let reffed_notes = self.symbol_annotations(ctx.reffed)?;
        let prop_notes = self.symbol_annotations(ctx.prop)?;
        let own_notes = self.symbol_annotations(node.symbol.as_ref())?;
        let nullable = reffed_notes.is_nullable() || prop_notes.is_nullable() || own_notes.is_nullable();

        let mut definition = Definition::new();
        let mut returned = if as_ref { Some(Definition::reference(&full_name)) } else { None };

        reffed_notes.apply_to(&mut definition);
        match returned.as_mut() {
            Some(reference) => prop_notes.apply_to(reference),
            None => prop_notes.apply_to(&mut definition),
        }
        own_notes.apply_to(&mut definition);

        if !as_ref || !self.registry.contains_key(&full_name) {
            if as_ref {
                debug!(name = %full_name, "registering definition");
                self.registry.insert(full_name.clone(), Definition::new());
                if self.options.use_title && !full_name.is_empty() {
                    definition.insert("title", full_name.clone());
                }
            }
            // a `type` set by annotations wins over inference
            if !definition.has_type() {
                let shape = self.shape_of(node, ctx.reffed)?;
                self.infer(node, shape, ctx, &mut definition)?;
            }
            if as_ref {
                self.registry.insert(full_name.clone(), definition.clone());
            }
        }

        let mut returned = returned.unwrap_or(definition);
        if nullable {
            returned.make_nullable();
        }
        Ok(returned)
    }

    fn symbol_annotations(&self, symbol: Option<&SymbolId>) -> Result<Annotations> {
        let Some(id) = symbol else { return Ok(Annotations::default()) };
        let symbol = self.program.symbol(id)?;
        if symbol.documentation.is_empty() && symbol.tags.is_empty() {
            return Ok(Annotations::default());
        }
        Ok(self.annotations.parse_symbol(&symbol.documentation, &symbol.tags))
    }

    // ---- shape ----

    pub fn shape_of(&self, node: &'p TypeNode, reffed: Option<&'p SymbolId>) -> Result<Shape<'p>> {
        let program = self.program;
        match &node.kind {
            TypeKind::Union { types } => return Ok(Shape::Union(types)),
            TypeKind::Intersection { types } => return Ok(Shape::Intersection(types)),
            TypeKind::Tuple { elements } => return Ok(Shape::Tuple(elements)),
            TypeKind::Object(_) | TypeKind::Enum => {}
            _ => return self.root_shape(node, reffed),
        }

        let symbol = node.symbol.as_ref().map(|s| program.symbol(s)).transpose()?;
        let Some(symbol) = symbol else {
            return match self.root_shape(node, reffed)? {
                Shape::Unsupported if matches!(node.kind, TypeKind::Object(_)) => self.class_shape(node, None),
                shape => Ok(shape),
            };
        };
        if RAW_SYMBOLS.contains(&symbol.name.as_str()) {
            return self.root_shape(node, reffed);
        }

        let decl = match node.symbol.as_ref() {
            Some(id) => program.first_declaration(id)?,
            None => None,
        };
        if let Some(decl) = decl.filter(|d| d.kind == DeclKind::Enum) {
            return Ok(Shape::Enum(decl));
        }

        let no_properties = match &node.kind {
            TypeKind::Object(obj) => obj.properties.is_empty() && obj.string_index.is_none() && obj.number_index.is_none(),
            _ => true,
        };
        let is_mapped = decl.is_some_and(|d| d.kind == DeclKind::MappedType);
        let has_members = decl.is_some_and(|d| !d.members.is_empty());
        if symbol.is_type_literal && no_properties && !is_mapped && !has_members {
            return Ok(Shape::EmptyObject);
        }

        self.class_shape(node, decl)
    }

    fn class_shape(&self, node: &'p TypeNode, decl: Option<&'p Declaration>) -> Result<Shape<'p>> {
        if decl.is_some_and(|d| d.kind == DeclKind::FunctionType) {
            return Ok(Shape::Function);
        }

        let (properties, string_index, number_index) = match &node.kind {
            TypeKind::Object(obj) => (obj.properties.as_slice(), obj.string_index.as_ref(), obj.number_index.as_ref()),
            _ => (&[][..], None, None),
        };

        if properties.is_empty() {
            match decl.map(|d| d.members.as_slice()) {
                Some([Member::IndexSignature { parameters, value }]) => {
                    let key = self.index_key(node, parameters)?;
                    return Ok(Shape::Map { key, value });
                }
                Some([]) | None => {
                    if let Some(value) = string_index {
                        return Ok(Shape::Map { key: IndexKey::String, value });
                    }
                    if let Some(value) = number_index {
                        return Ok(Shape::Map { key: IndexKey::Number, value });
                    }
                }
                Some(_) => {}
            }
        }

        if decl.is_some_and(|d| d.is_abstract) {
            return Ok(Shape::Abstract);
        }
        Ok(Shape::Object(properties))
    }

    fn index_key(&self, node: &TypeNode, parameters: &[TypeId]) -> Result<IndexKey> {
        let [key] = parameters else {
            return Err(Error::IndexSignatureArity {
                type_name: strip_module_path(&node.name),
                count: parameters.len(),
            });
        };
        let key_node = self.program.type_node(key)?;
        match key_node.kind {
            TypeKind::String => Ok(IndexKey::String),
            TypeKind::Number => Ok(IndexKey::Number),
            _ => Err(Error::UnsupportedIndexKey {
                type_name: strip_module_path(&node.name),
                key: key_node.name.clone(),
            }),
        }
    }

    // ---- render ----

    fn infer(&mut self, node: &'p TypeNode, shape: Shape<'p>, ctx: Context<'p>, def: &mut Definition) -> Result<()> {
        match shape {
            Shape::Union(types) => self.union_definition(types, ctx, def)?,
            Shape::Intersection(types) => {
                let mut all_of = Vec::with_capacity(types.len());
                for member in types {
                    all_of.push(self.type_definition(member, self.nested())?.into_value());
                }
                def.insert("allOf", all_of);
            }
            Shape::Tuple(elements) => self.tuple_definition(elements, def)?,
            Shape::Primitive(tag) => def.set_type(tag),
            Shape::Literal(value) => root::literal_definition(value, def),
            Shape::Array(element) => {
                let items = self.type_definition(element, self.nested())?;
                def.set_type("array");
                def.insert("items", items);
            }
            Shape::Date => {
                def.set_type("string");
                def.insert("format", "date-time");
            }
            Shape::NonPrimitive => {
                def.set_type("object");
                def.insert("properties", serde_json::Map::new());
                def.insert("additionalProperties", true);
            }
            Shape::Unconstrained => {}
            Shape::Unsupported => {
                warn!(r#type = %node.name, "unsupported type; leaving it unconstrained");
            }
            Shape::Enum(decl) => enums::enum_definition(decl, def),
            Shape::EmptyObject => {
                def.set_type("object");
                def.insert("properties", serde_json::Map::new());
            }
            Shape::Function => {
                if self.options.use_type_of_keyword {
                    def.insert("typeof", "function");
                } else {
                    warn!(r#type = %node.name, "function type rendered as an object; enable useTypeOfKeyword for `typeof`");
                    self.object_definition(&[], def)?;
                }
            }
            Shape::Map { key, value } => {
                let value_def = self.type_definition(value, Context {
                    union_keyword: UnionKeyword::AnyOf,
                    ..self.nested()
                })?;
                match key {
                    IndexKey::String => {
                        def.set_type("object");
                        def.insert("additionalProperties", value_def);
                    }
                    IndexKey::Number => {
                        def.set_type("array");
                        def.insert("items", value_def);
                    }
                }
            }
            Shape::Abstract => self.abstract_definition(node, def)?,
            Shape::Object(properties) => self.object_definition(properties, def)?,
        }
        Ok(())
    }

    fn tuple_definition(&mut self, elements: &'p [TypeId], def: &mut Definition) -> Result<()> {
        let mut items = Vec::with_capacity(elements.len());
        for element in elements {
            items.push(self.type_definition(element, self.nested())?.into_value());
        }
        let mut additional = Definition::new();
        additional.insert("anyOf", items.clone());

        def.set_type("array");
        def.insert("minItems", items.len());
        def.insert("items", items);
        def.insert("additionalItems", additional);
        Ok(())
    }

    fn abstract_definition(&mut self, node: &TypeNode, def: &mut Definition) -> Result<()> {
        let symbols = self.symbols;
        let name = strip_module_path(&node.name);
        let subtypes = symbols
            .inheriting
            .get(&name)
            .ok_or_else(|| Error::MissingSubtypes(name.clone()))?;
        let mut one_of = Vec::with_capacity(subtypes.len());
        for subtype in subtypes {
            let ty = symbols.all.get(subtype).ok_or_else(|| Error::UnknownType(subtype.clone()))?;
            one_of.push(self.type_definition(ty, self.nested())?.into_value());
        }
        def.insert("oneOf", one_of);
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::program;
    use serde_json::json;

    fn classify(p: &Program, options: &Options, ty: &str) -> (Value, IndexMap<String, Definition>) {
        let symbols = SymbolTable::collect(p).unwrap();
        let mut c = Classifier::new(p, options, &symbols);
        let id = TypeId::from(ty);
        let def = c.type_definition(&id, Context::new(false)).unwrap();
        (def.into_value(), c.into_registry())
    }

    #[test]
    fn self_reference_terminates_with_one_entry() {
        let p = program(json!({
            "modules": [{"fileName": "a.ts", "statements": ["d:Node"]}],
            "declarations": {
                "d:Node": {"kind": "interface", "symbol": "s:Node"},
                "d:Node.next": {"kind": "property", "symbol": "s:Node.next", "typeReference": "s:Node"},
            },
            "symbols": {
                "s:Node": {"name": "Node", "qualifiedName": "\"a\".Node", "type": "t:Node", "declarations": ["d:Node"]},
                "s:Node.next": {"name": "next", "type": "t:Node", "declarations": ["d:Node.next"]},
            },
            "types": {
                "t:Node": {"name": "\"a\".Node", "symbol": "s:Node", "kind": "object", "properties": ["s:Node.next"]},
            },
        }));
        let (root, registry) = classify(&p, &Options::default(), "t:Node");
        assert_eq!(root, json!({"type": "object", "properties": {"next": {"$ref": "#/definitions/Node"}}}));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry["Node"].clone().into_value(),
            json!({"type": "object", "properties": {"next": {"$ref": "#/definitions/Node"}}})
        );
    }

    #[test]
    fn intersection_is_all_of_members() {
        let p = program(json!({
            "types": {
                "t:i": {"kind": "intersection", "types": ["t:s", "t:n"]},
                "t:s": {"name": "string", "kind": "string"},
                "t:n": {"name": "number", "kind": "number"},
            },
        }));
        let (root, _) = classify(&p, &Options::default(), "t:i");
        assert_eq!(root, json!({"allOf": [{"type": "string"}, {"type": "number"}]}));
    }

    #[test]
    fn tuple_allows_any_slot_type_as_overflow() {
        let p = program(json!({
            "types": {
                "t:tup": {"name": "[string, number]", "kind": "tuple", "elements": ["t:s", "t:n"]},
                "t:s": {"name": "string", "kind": "string"},
                "t:n": {"name": "number", "kind": "number"},
            },
        }));
        let (root, _) = classify(&p, &Options::default(), "t:tup");
        assert_eq!(root, json!({
            "type": "array",
            "minItems": 2,
            "items": [{"type": "string"}, {"type": "number"}],
            "additionalItems": {"anyOf": [{"type": "string"}, {"type": "number"}]},
        }));
    }

    #[test]
    fn annotated_type_skips_inference() {
        let p = program(json!({
            "symbols": {"s:Id": {"name": "Id", "documentation": ["@TJS-type integer\n@minimum 1"]}},
            "types": {"t:n": {"name": "number", "kind": "number", "symbol": "s:Id"}},
        }));
        let (root, _) = classify(&p, &Options::default(), "t:n");
        assert_eq!(root, json!({"type": "integer", "minimum": 1}));
    }

    #[test]
    fn unnamed_cycle_hits_the_depth_limit() {
        let p = program(json!({
            "types": {"t:loop": {"kind": "tuple", "elements": ["t:loop"]}},
        }));
        let symbols = SymbolTable::collect(&p).unwrap();
        let options = Options::default();
        let mut c = Classifier::new(&p, &options, &symbols);
        let id = TypeId::from("t:loop");
        let err = c.type_definition(&id, Context::new(false)).unwrap_err();
        assert!(matches!(err, Error::RecursionLimit(_)));
    }

    fn shapes_program() -> Program {
        let mut types = crate::test_support::scalars();
        types["t:Bag"] = json!({"name": "Bag", "symbol": "s:Bag", "kind": "object"});
        types["t:List"] = json!({"name": "List", "symbol": "s:List", "kind": "object"});
        types["t:BadKey"] = json!({"name": "BadKey", "symbol": "s:BadKey", "kind": "object"});
        types["t:TwoKeys"] = json!({"name": "TwoKeys", "symbol": "s:TwoKeys", "kind": "object"});
        types["t:Shape"] = json!({"name": "\"s\".Shape", "symbol": "s:Shape", "kind": "object"});
        types["t:Circle"] = json!({"name": "\"s\".Circle", "symbol": "s:Circle", "kind": "object", "baseTypes": ["t:Shape"]});
        types["t:Square"] = json!({"name": "\"s\".Square", "symbol": "s:Square", "kind": "object", "baseTypes": ["t:Shape"]});
        types["t:Lonely"] = json!({"name": "Lonely", "symbol": "s:Lonely", "kind": "object"});
        types["t:fn"] = json!({"name": "() => void", "symbol": "s:fn", "kind": "object", "anonymous": true});
        types["t:empty"] = json!({"name": "{}", "symbol": "s:literal", "kind": "object", "anonymous": true});
        types["t:Dir"] = json!({"name": "Dir", "kind": "union", "types": ["t:b", "t:a"]});
        types["t:Color"] = json!({"name": "Color", "symbol": "s:Color", "kind": "enum"});
        program(json!({
            "modules": [{"fileName": "s.ts", "statements": ["d:Shape", "d:Circle", "d:Square", "d:Lonely", "d:Color"]}],
            "declarations": {
                "d:Bag": {"kind": "interface", "symbol": "s:Bag", "members": [
                    {"kind": "indexSignature", "parameters": ["t:string"], "type": "t:number"},
                ]},
                "d:List": {"kind": "interface", "symbol": "s:List", "members": [
                    {"kind": "indexSignature", "parameters": ["t:number"], "type": "t:string"},
                ]},
                "d:BadKey": {"kind": "interface", "symbol": "s:BadKey", "members": [
                    {"kind": "indexSignature", "parameters": ["t:boolean"], "type": "t:string"},
                ]},
                "d:TwoKeys": {"kind": "interface", "symbol": "s:TwoKeys", "members": [
                    {"kind": "indexSignature", "parameters": ["t:string", "t:number"], "type": "t:string"},
                ]},
                "d:Shape": {"kind": "class", "symbol": "s:Shape", "isAbstract": true},
                "d:Circle": {"kind": "class", "symbol": "s:Circle"},
                "d:Square": {"kind": "class", "symbol": "s:Square"},
                "d:Lonely": {"kind": "class", "symbol": "s:Lonely", "isAbstract": true},
                "d:fn": {"kind": "functionType", "symbol": "s:fn"},
                "d:Dir": {"kind": "typeAlias", "symbol": "s:Dir"},
                "d:Color": {"kind": "enum", "symbol": "s:Color", "enumMembers": [
                    {"name": "Red", "constantValue": "red"},
                    {"name": "Blue", "constantValue": "blue"},
                ]},
            },
            "symbols": {
                "s:Bag": {"name": "Bag", "declarations": ["d:Bag"]},
                "s:List": {"name": "List", "declarations": ["d:List"]},
                "s:BadKey": {"name": "BadKey", "declarations": ["d:BadKey"]},
                "s:TwoKeys": {"name": "TwoKeys", "declarations": ["d:TwoKeys"]},
                "s:Shape": {"name": "Shape", "qualifiedName": "\"s\".Shape", "type": "t:Shape", "declarations": ["d:Shape"]},
                "s:Circle": {"name": "Circle", "qualifiedName": "\"s\".Circle", "type": "t:Circle", "declarations": ["d:Circle"]},
                "s:Square": {"name": "Square", "qualifiedName": "\"s\".Square", "type": "t:Square", "declarations": ["d:Square"]},
                "s:Lonely": {"name": "Lonely", "qualifiedName": "Lonely", "type": "t:Lonely", "declarations": ["d:Lonely"]},
                "s:fn": {"name": "__type", "declarations": ["d:fn"]},
                "s:literal": {"name": "__type", "isTypeLiteral": true},
                "s:Dir": {"name": "Dir", "qualifiedName": "\"s\".Dir", "type": "t:Dir", "declarations": ["d:Dir"]},
                "s:Color": {"name": "Color", "qualifiedName": "Color", "type": "t:Color", "declarations": ["d:Color"]},
            },
            "types": types,
        }))
    }

    fn render_with(options: &Options, ty: &str, ctx: Context<'_>) -> Result<(Value, IndexMap<String, Definition>)> {
        let p = shapes_program();
        let symbols = SymbolTable::collect(&p)?;
        let mut c = Classifier::new(&p, options, &symbols);
        let id = TypeId::from(ty);
        let def = c.type_definition(&id, ctx)?;
        Ok((def.into_value(), c.into_registry()))
    }

    fn render(ty: &str) -> Result<Value> {
        render_with(&Options::default(), ty, Context::new(false)).map(|(v, _)| v)
    }

    #[test]
    fn single_index_signature_becomes_a_map() {
        assert_eq!(render("t:Bag").unwrap(), json!({"type": "object", "additionalProperties": {"type": "number"}}));
        assert_eq!(render("t:List").unwrap(), json!({"type": "array", "items": {"type": "string"}}));
    }

    #[test]
    fn index_signature_key_must_be_string_or_number() {
        assert!(matches!(render("t:BadKey"), Err(Error::UnsupportedIndexKey { .. })));
        assert!(matches!(render("t:TwoKeys"), Err(Error::IndexSignatureArity { count: 2, .. })));
    }

    #[test]
    fn abstract_class_fans_out_to_subtypes() {
        let (root, registry) = render_with(&Options::default(), "t:Shape", Context::new(false)).unwrap();
        assert_eq!(root, json!({"oneOf": [
            {"$ref": "#/definitions/Circle"},
            {"$ref": "#/definitions/Square"},
        ]}));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["Circle", "Square"]);
    }

    #[test]
    fn abstract_class_without_subtypes_fails() {
        assert!(matches!(render("t:Lonely"), Err(Error::MissingSubtypes(name)) if name == "Lonely"));
    }

    #[test]
    fn function_types_need_the_typeof_keyword() {
        assert_eq!(render("t:fn").unwrap(), json!({"type": "object"}));
        let options = Options { use_type_of_keyword: true, ..Options::default() };
        let (root, _) = render_with(&options, "t:fn", Context::new(false)).unwrap();
        assert_eq!(root, json!({"typeof": "function"}));
    }

    #[test]
    fn empty_type_literal_is_an_open_object() {
        assert_eq!(render("t:empty").unwrap(), json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn enum_types_list_their_members() {
        assert_eq!(render("t:Color").unwrap(), json!({"type": "string", "enum": ["blue", "red"]}));
    }

    #[test]
    fn string_literal_alias_is_referenced_by_alias_name() {
        let reffed = SymbolId::from("s:Dir");
        let ctx = Context { reffed: Some(&reffed), ..Context::new(true) };
        let (root, registry) = render_with(&Options::default(), "t:Dir", ctx).unwrap();
        assert_eq!(root, json!({"$ref": "#/definitions/Dir"}));
        assert_eq!(registry["Dir"].clone().into_value(), json!({"type": "string", "enum": ["a", "b"]}));
    }

    #[test]
    fn titles_name_registry_entries() {
        let options = Options { use_title: true, ..Options::default() };
        let (root, registry) = render_with(&options, "t:Color", Context::new(true)).unwrap();
        assert_eq!(root, json!({"$ref": "#/definitions/Color"}));
        assert_eq!(registry["Color"].get("title"), Some(&json!("Color")));
    }
}
