//! Symbol collection.
//!
//! One walk over every module's declaration tree builds the name → type
//! tables the classifier resolves against, plus the inheritance index used
//! to fan abstract types out into their concrete subtypes.
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::program::{DeclId, Program, TypeId, TypeKind};

static MODULE_QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r#""[^"]*"\."#).expect("module qualifier regex"));

/// `"src/shapes".Circle` → `Circle`; `Outer.Inner` is left alone.
pub fn strip_module_path(qualified: &str) -> String {
    MODULE_QUALIFIER.replace_all(qualified, "").into_owned()
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Every named class / interface / enum / type alias.
    pub all: IndexMap<String, TypeId>,
    /// The subset declared outside of default-library modules.
    pub user: IndexMap<String, TypeId>,
    /// Base type name → names of the types that extend or implement it.
    pub inheriting: IndexMap<String, Vec<String>>,
}

impl SymbolTable {
    pub fn collect(program: &Program) -> Result<Self> {
        let mut table = Self::default();
        for module in &program.modules {
            for stmt in &module.statements {
                table.inspect(program, stmt, module.is_default_lib)?;
            }
        }
        debug!(
            all = table.all.len(),
            user = table.user.len(),
            bases = table.inheriting.len(),
            "collected symbols"
        );
        Ok(table)
    }

    fn inspect(&mut self, program: &Program, id: &DeclId, is_lib: bool) -> Result<()> {
        let decl = program.declaration(id)?;
        if !decl.kind.is_named_type() {
            for child in &decl.children {
                self.inspect(program, child, is_lib)?;
            }
            return Ok(());
        }

        let Some(symbol_id) = decl.symbol.as_ref() else { return Ok(()) };
        let symbol = program.symbol(symbol_id)?;
        let Some(type_id) = symbol.type_.clone() else {
            debug!(symbol = %symbol.qualified_name, "named declaration without a type");
            return Ok(());
        };

        let name = strip_module_path(&symbol.qualified_name);
        if let Some(previous) = self.all.insert(name.clone(), type_id.clone()) {
            if previous != type_id {
                warn!(%name, "type name declared in more than one module; keeping the last one");
            }
        }
        if !is_lib {
            self.user.insert(name.clone(), type_id.clone());
        }

        if let TypeKind::Object(obj) = &program.type_node(&type_id)?.kind {
            for base in &obj.base_types {
                let base_name = strip_module_path(&program.type_node(base)?.name);
                self.inheriting.entry(base_name).or_default().push(name.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn program() -> Program {
        serde_json::from_value(json!({
            "modules": [
                {"fileName": "lib.d.ts", "isDefaultLib": true, "statements": ["d:Date"]},
                {"fileName": "src/a.ts", "statements": ["d:ns"]},
                {"fileName": "src/b.ts", "statements": ["d:Circle", "d:Shape2"]},
            ],
            "declarations": {
                "d:Date": {"kind": "interface", "symbol": "s:Date"},
                "d:ns": {"kind": "module", "children": ["d:Shape"]},
                "d:Shape": {"kind": "class", "symbol": "s:Shape", "isAbstract": true},
                "d:Circle": {"kind": "class", "symbol": "s:Circle"},
                "d:Shape2": {"kind": "interface", "symbol": "s:Shape2"},
            },
            "symbols": {
                "s:Date": {"name": "Date", "qualifiedName": "Date", "type": "t:Date"},
                "s:Shape": {"name": "Shape", "qualifiedName": "\"src/a\".Shape", "type": "t:Shape"},
                "s:Circle": {"name": "Circle", "qualifiedName": "\"src/b\".Circle", "type": "t:Circle"},
                "s:Shape2": {"name": "Shape", "qualifiedName": "\"src/b\".Shape", "type": "t:Shape2"},
            },
            "types": {
                "t:Date": {"name": "Date", "symbol": "s:Date", "kind": "object"},
                "t:Shape": {"name": "\"src/a\".Shape", "symbol": "s:Shape", "kind": "object"},
                "t:Circle": {"name": "\"src/b\".Circle", "symbol": "s:Circle", "kind": "object", "baseTypes": ["t:Shape"]},
                "t:Shape2": {"name": "\"src/b\".Shape", "symbol": "s:Shape2", "kind": "object"},
            },
        }))
        .unwrap()
    }

    #[test]
    fn strips_quoted_module_prefix_only() {
        assert_eq!(strip_module_path("\"src/a\".Shape"), "Shape");
        assert_eq!(strip_module_path("Outer.Inner"), "Outer.Inner");
        assert_eq!(strip_module_path("Array<\"src/a\".Shape>"), "Array<Shape>");
        assert_eq!(strip_module_path("Pair<\"a\".X, \"b\".Y>"), "Pair<X, Y>");
    }

    #[test]
    fn user_symbols_exclude_default_lib() {
        let table = SymbolTable::collect(&program()).unwrap();
        assert!(table.all.contains_key("Date"));
        assert!(!table.user.contains_key("Date"));
        assert!(table.user.contains_key("Circle"));
    }

    #[test]
    fn later_module_overwrites_same_name() {
        let table = SymbolTable::collect(&program()).unwrap();
        assert_eq!(table.all.get("Shape"), Some(&TypeId::from("t:Shape2")));
    }

    #[test]
    fn records_inheritance() {
        let table = SymbolTable::collect(&program()).unwrap();
        assert_eq!(table.inheriting.get("Shape"), Some(&vec!["Circle".to_string()]));
    }
}
