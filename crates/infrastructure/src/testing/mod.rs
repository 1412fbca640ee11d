//! Response verification infrastructure.
//!
//! This module provides the verifier that checks HTTP responses against
//! their expected contracts.

mod runner;

pub use runner::ContractVerifier;
