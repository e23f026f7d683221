//! Error types.
//!
//! `Error` covers structural failures that abort a whole generation run.
//! Degraded cases (unknown type strings, unsupported default values) are not
//! errors; they are logged through `tracing` and generation carries on.
use std::path::PathBuf;

use crate::program::{DeclId, SymbolId, TypeId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("type {0} not found")]
    UnknownType(String),

    #[error("not supported: index signature on {type_name} keyed by `{key}` (only string and number keys)")]
    UnsupportedIndexKey { type_name: String, key: String },

    #[error("not supported: index signature on {type_name} with {count} parameters (expected 1)")]
    IndexSignatureArity { type_name: String, count: usize },

    #[error("abstract type {0} has no known subtypes")]
    MissingSubtypes(String),

    #[error("type {0} nests too deeply; an unnamed type probably refers to itself")]
    RecursionLimit(String),

    #[error("program graph references unknown type id `{0}`")]
    DanglingType(TypeId),

    #[error("program graph references unknown symbol id `{0}`")]
    DanglingSymbol(SymbolId),

    #[error("program graph references unknown declaration id `{0}`")]
    DanglingDeclaration(DeclId),
}

/// Failure to read a program graph or an options file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: at JSON path {at} → {source}", path.display())]
    Parse {
        path: PathBuf,
        at: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
