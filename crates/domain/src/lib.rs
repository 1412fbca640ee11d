//! Petstore Contract Domain - Core types
//!
//! This crate defines the domain model of the order contract harness:
//! operations, fixtures, requests, observed responses, expected contracts
//! and check results. All types here are pure Rust with no I/O dependencies.

pub mod contract;
pub mod error;
pub mod fixture;
pub mod id;
pub mod operation;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;

pub use contract::{
    BodyExpectation, ContractBook, ExpectedContract, ExpectedHeader, ExpectedValue,
    FieldExpectation, petstore_headers,
};
pub use error::{DomainError, DomainResult};
pub use fixture::{OrderFixture, normalize_timestamp};
pub use id::generate_run_id;
pub use operation::Operation;
pub use settings::{DEFAULT_BASE_URL, HarnessConfig};
pub use testing::{Check, CheckResult, OperationResults, format_list};
