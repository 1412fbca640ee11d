//! Contract files: a [`ContractBook`] stored as JSON on disk.

use std::fs;
use std::path::Path;

use petstore_contract_domain::ContractBook;
use tracing::{debug, info};

use super::json::{SerializationError, from_json, to_json_stable};

/// Reads a contract book from `path`.
///
/// Each slot must hold the contract of its own operation.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a
/// valid contract book.
pub fn load_contract_book(path: &Path) -> Result<ContractBook, SerializationError> {
    debug!(path = %path.display(), "loading contract file");
    let content = fs::read_to_string(path).map_err(|source| SerializationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&content)
}

/// Writes `book` to `path` as stable, pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_contract_book(path: &Path, book: &ContractBook) -> Result<(), SerializationError> {
    let json = to_json_stable(book)?;
    fs::write(path, json).map_err(|source| SerializationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "contract file written");
    Ok(())
}
