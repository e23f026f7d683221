//! Program-graph builders shared by unit tests.
use serde_json::{json, Value};

use crate::program::Program;

pub fn program(graph: Value) -> Program {
    serde_json::from_value(graph).expect("test program graph")
}

/// Primitive and literal type nodes under stable ids.
pub fn scalars() -> Value {
    json!({
        "t:string": {"name": "string", "kind": "string"},
        "t:number": {"name": "number", "kind": "number"},
        "t:boolean": {"name": "boolean", "kind": "boolean"},
        "t:null": {"name": "null", "kind": "null"},
        "t:undefined": {"name": "undefined", "kind": "undefined"},
        "t:any": {"name": "any", "kind": "any"},
        "t:true": {"name": "true", "kind": "booleanLiteral", "value": true},
        "t:false": {"name": "false", "kind": "booleanLiteral", "value": false},
        "t:a": {"name": "\"a\"", "kind": "stringLiteral", "value": "a"},
        "t:b": {"name": "\"b\"", "kind": "stringLiteral", "value": "b"},
        "t:c": {"name": "\"c\"", "kind": "stringLiteral", "value": "c"},
        "t:1": {"name": "1", "kind": "numberLiteral", "value": 1},
        "t:numbers": {"name": "number[]", "kind": "object", "numberIndex": "t:number"},
    })
}
