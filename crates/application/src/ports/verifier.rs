//! Response verifier port

use petstore_contract_domain::{ExpectedContract, OperationResults, response::ResponseSpec};

/// Port for checking a response against its contract.
///
/// The verifier owns JSON decoding of the body; the application only sees
/// the per-check results.
pub trait ResponseVerifier: Send + Sync {
    /// Verifies `response` against `contract`, one result per expectation.
    fn verify(&self, contract: &ExpectedContract, response: &ResponseSpec) -> OperationResults;
}
