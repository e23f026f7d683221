//! Schema assembly: one requested type (or every user type) → a draft-04
//! document with `$schema` and `definitions`.
use serde_json::Map;
use tracing::{debug, error, warn};

use crate::classify::{Classifier, Context};
use crate::collector::SymbolTable;
use crate::definition::{Definition, DRAFT_04};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::program::Program;

/// Target name that selects every user-declared type.
pub const ALL_TYPES: &str = "*";

pub struct SchemaGenerator<'p> {
    program: &'p Program,
    options: &'p Options,
    symbols: SymbolTable,
}

impl<'p> SchemaGenerator<'p> {
    pub fn new(program: &'p Program, options: &'p Options) -> Result<Self> {
        let symbols = SymbolTable::collect(program)?;
        Ok(Self { program, options, symbols })
    }

    /// Names of the types declared outside default-library modules.
    pub fn user_symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.user.keys().map(String::as_str)
    }

    pub fn schema_for(&self, name: &str) -> Result<Definition> {
        let ty = self.symbols.all.get(name).ok_or_else(|| Error::UnknownType(name.to_string()))?;
        let mut classifier = Classifier::new(self.program, self.options, &self.symbols);
        let mut root = classifier.type_definition(ty, Context::new(self.options.use_root_ref))?;

        let registry = classifier.into_registry();
        if self.options.use_ref && !registry.is_empty() {
            debug!(count = registry.len(), "attaching definitions");
            let definitions: Map<_, _> = registry.into_iter().map(|(k, v)| (k, v.into_value())).collect();
            root.insert("definitions", definitions);
        }
        root.insert("$schema", DRAFT_04);
        Ok(root)
    }

    pub fn schema_for_all(&self) -> Result<Definition> {
        let mut classifier = Classifier::new(self.program, self.options, &self.symbols);
        let mut definitions = Map::new();
        for (name, ty) in &self.symbols.user {
            let def = classifier.type_definition(ty, Context::new(false))?;
            definitions.insert(name.clone(), def.into_value());
        }
        for (name, def) in classifier.into_registry() {
            definitions.insert(name, def.into_value());
        }

        let mut root = Definition::new();
        root.insert("$schema", DRAFT_04);
        root.insert("definitions", definitions);
        Ok(root)
    }
}

/// Generate the schema for `target` (a type name or `"*"`).
///
/// Returns `Ok(None)` without generating anything when the program carries
/// front-end diagnostics and `ignore_errors` is off; each diagnostic is
/// logged at `error` level.
pub fn generate(program: &Program, target: &str, options: &Options) -> Result<Option<Definition>> {
    if options.strict_null_checks != program.compiler_options.strict_null_checks {
        warn!(
            requested = options.strict_null_checks,
            program = program.compiler_options.strict_null_checks,
            "strictNullChecks differs from the setting the program was checked with"
        );
    }
    if !program.diagnostics.is_empty() && !options.ignore_errors {
        for diagnostic in &program.diagnostics {
            error!("{diagnostic}");
        }
        return Ok(None);
    }

    let generator = SchemaGenerator::new(program, options)?;
    let schema = match target {
        ALL_TYPES => generator.schema_for_all()?,
        name => generator.schema_for(name)?,
    };
    Ok(Some(schema))
}

// ------------------------------- Tests ------------------------------------ //
