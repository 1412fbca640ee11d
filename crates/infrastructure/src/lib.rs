//! Petstore Contract Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading,
//! contract files and report rendering.

pub mod adapters;
pub mod report;
pub mod serialization;
pub mod settings;
pub mod testing;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use report::render_report;
pub use serialization::{
    SerializationError, from_json, load_contract_book, save_contract_book, to_json_stable,
};
pub use settings::{SettingsError, load_config, load_config_with};
pub use testing::ContractVerifier;
