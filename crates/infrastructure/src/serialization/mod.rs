//! Deterministic JSON serialization and contract files.
//!
//! Output uses 2-space indentation and a trailing newline so saved
//! contract files diff cleanly.

mod contract_file;
mod json;

pub use contract_file::{load_contract_book, save_contract_book};
pub use json::{SerializationError, from_json, to_json_stable};
