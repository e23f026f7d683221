use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str, origin: &Path) -> Result<T, LoadError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let at = err.path().to_string();
        LoadError::Parse { path: origin.to_path_buf(), at, source: err.into_inner() }
    })
}

/// Read and deserialize a JSON file (program graph dumps, options files).
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str_with_path(&source, path)
}
