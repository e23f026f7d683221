//! Read-only view of a type-checked program.
//!
//! The front end (a TypeScript checker) dumps its symbol/type graph as JSON;
//! this module is the serde model of that dump plus the lookups the
//! classifier needs. Nothing here mutates after loading.
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, LoadError};
use crate::path_de::read_json_file;

// ————————————————————————————————————————————————————————————————————————————
// IDS
// ————————————————————————————————————————————————————————————————————————————

macro_rules! arena_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self { Self(s.to_string()) }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

arena_id!(TypeId);
arena_id!(SymbolId);
arena_id!(DeclId);

// ————————————————————————————————————————————————————————————————————————————
// PROGRAM
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Program {
    pub modules: Vec<SourceModule>,
    pub declarations: IndexMap<DeclId, Declaration>,
    pub symbols: IndexMap<SymbolId, Symbol>,
    pub types: IndexMap<TypeId, TypeNode>,
    pub diagnostics: Vec<Diagnostic>,
    pub compiler_options: CompilerOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    pub strict_null_checks: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceModule {
    pub file_name: String,
    /// Library / ambient declarations (lib.d.ts and friends).
    pub is_default_lib: bool,
    pub statements: Vec<DeclId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Diagnostic {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.column, self.message)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    EnumMember,
    TypeAlias,
    TypeLiteral,
    FunctionType,
    MappedType,
    Module,
    Property,
    Method,
    #[default]
    Other,
}

impl DeclKind {
    /// Declarations the collector registers by name.
    pub fn is_named_type(self) -> bool {
        matches!(self, DeclKind::Class | DeclKind::Interface | DeclKind::Enum | DeclKind::TypeAlias)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Declaration {
    pub kind: DeclKind,
    pub symbol: Option<SymbolId>,
    pub is_abstract: bool,
    pub members: Vec<Member>,
    pub children: Vec<DeclId>,
    pub enum_members: Vec<EnumMember>,
    pub initializer: Option<Initializer>,
    /// Symbol named by the declaration's type annotation (`a: Foo` → `Foo`).
    pub type_reference: Option<SymbolId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Member {
    Property { symbol: SymbolId },
    Method { symbol: SymbolId },
    IndexSignature {
        #[serde(default)]
        parameters: Vec<TypeId>,
        #[serde(rename = "type")]
        value: TypeId,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumMember {
    pub name: String,
    /// Value computed by the checker's constant evaluator, when it has one.
    pub constant_value: Option<Value>,
    pub initializer: Option<Initializer>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitializerKind {
    #[default]
    Literal,
    /// Template literal without substitutions.
    Template,
    /// Call, property access, `new`, ...
    Expression,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Initializer {
    pub text: String,
    pub kind: InitializerKind,
}

// ————————————————————————————————————————————————————————————————————————————
// SYMBOLS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Symbol {
    pub name: String,
    /// Checker's fully qualified name, e.g. `"src/shapes".Circle`.
    pub qualified_name: String,
    pub is_optional: bool,
    pub is_method: bool,
    pub is_alias: bool,
    pub is_type_literal: bool,
    pub alias_target: Option<SymbolId>,
    pub declarations: Vec<DeclId>,
    #[serde(rename = "type")]
    pub type_: Option<TypeId>,
    pub documentation: Vec<String>,
    pub tags: Vec<DocTag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocTag {
    pub name: String,
    pub text: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeNode {
    /// Display name with fully qualified type names.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: Option<SymbolId>,
    #[serde(flatten)]
    pub kind: TypeKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Any,
    Unknown,
    Void,
    Never,
    Bigint,
    EsSymbol,
    /// The `object` keyword.
    NonPrimitive,
    StringLiteral { value: String },
    NumberLiteral { value: f64 },
    BooleanLiteral { value: bool },
    EnumLiteral { value: Value },
    Union { types: Vec<TypeId> },
    Intersection { types: Vec<TypeId> },
    Tuple { elements: Vec<TypeId> },
    Object(ObjectType),
    /// A declared enum type; its members live on the enum declaration.
    Enum,
    TypeParameter,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectType {
    pub anonymous: bool,
    /// Resolved properties, inherited ones included.
    pub properties: Vec<SymbolId>,
    pub base_types: Vec<TypeId>,
    pub type_arguments: Vec<TypeId>,
    pub number_index: Option<TypeId>,
    pub string_index: Option<TypeId>,
}

// ————————————————————————————————————————————————————————————————————————————
// LOOKUPS
// ————————————————————————————————————————————————————————————————————————————

impl Program {
    pub fn type_node(&self, id: &TypeId) -> Result<&TypeNode, Error> {
        self.types.get(id).ok_or_else(|| Error::DanglingType(id.clone()))
    }

    pub fn symbol(&self, id: &SymbolId) -> Result<&Symbol, Error> {
        self.symbols.get(id).ok_or_else(|| Error::DanglingSymbol(id.clone()))
    }

    pub fn declaration(&self, id: &DeclId) -> Result<&Declaration, Error> {
        self.declarations.get(id).ok_or_else(|| Error::DanglingDeclaration(id.clone()))
    }

    /// First declaration of a symbol, if it has any.
    pub fn first_declaration(&self, symbol: &SymbolId) -> Result<Option<&Declaration>, Error> {
        match self.symbol(symbol)?.declarations.first() {
            Some(decl) => self.declaration(decl).map(Some),
            None => Ok(None),
        }
    }

    /// Follows alias symbols to the symbol they stand for.
    pub fn resolve_alias<'a>(&'a self, mut id: &'a SymbolId) -> Result<&'a SymbolId, Error> {
        let mut hops = 0;
        while let Some(target) = self.symbol(id)?.alias_target.as_ref() {
            id = target;
            hops += 1;
            if hops > 64 { break; }
        }
        Ok(id)
    }

    /// Reads and merges graph dumps in order.
    pub fn from_files<I, P>(paths: I) -> Result<Program, LoadError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut program = Program::default();
        for path in paths {
            let path = path.as_ref();
            let part: Program = read_json_file(path)?;
            debug!(path = %path.display(), types = part.types.len(), "loaded program graph");
            program.merge(part);
        }
        Ok(program)
    }

    /// Folds another graph dump into this one; later entries win on id clashes.
    pub fn merge(&mut self, other: Program) {
        self.modules.extend(other.modules);
        self.declarations.extend(other.declarations);
        self.symbols.extend(other.symbols);
        self.types.extend(other.types);
        self.diagnostics.extend(other.diagnostics);
        self.compiler_options.strict_null_checks |= other.compiler_options.strict_null_checks;
    }
}

// ------------------------------- Tests ------------------------------------ //
