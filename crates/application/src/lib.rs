//! Petstore Contract Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP client, response verifier, clock)
//! - The contract scenario use case
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod run_scenario;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, HttpClient, HttpClientError, ResponseVerifier};
pub use run_scenario::{ContractScenario, OperationOutcome, PlacedOrder, ScenarioReport};
