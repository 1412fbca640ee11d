//! Petstore Contract - wiring of the contract harness
//!
//! Builds the adapters from a [`HarnessConfig`] and runs the order
//! scenario against the configured deployment.

use std::sync::Arc;

use petstore_contract_application::{
    ApplicationError, ContractScenario, HttpClientError, ScenarioReport,
};
use petstore_contract_domain::{ContractBook, DomainError, HarnessConfig, OrderFixture};
use petstore_contract_infrastructure::{
    ContractVerifier, ReqwestHttpClient, SerializationError, SettingsError, SystemClock,
    load_contract_book,
};
use thiserror::Error;
use tracing::info;

/// Errors that stop the harness before a report exists.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The contract file could not be read.
    #[error("contract file: {0}")]
    Contracts(#[from] SerializationError),

    /// Fixture or contracts are invalid.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The HTTP client could not be created.
    #[error("HTTP client: {0}")]
    Client(#[from] HttpClientError),

    /// The scenario was misconfigured.
    #[error(transparent)]
    Scenario(#[from] ApplicationError),
}

/// Returns the contracts of a run: the contract file named by
/// `contracts_path`, or the built-in petstore contracts for `fixture`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the fixture ship date
/// is invalid.
pub fn resolve_contracts(
    config: &HarnessConfig,
    fixture: &OrderFixture,
) -> Result<ContractBook, HarnessError> {
    match &config.contracts_path {
        Some(path) => {
            info!(path = %path.display(), "using contract file");
            Ok(load_contract_book(path)?)
        }
        None => Ok(ContractBook::petstore(fixture)?),
    }
}

/// Runs the scenario for `fixture` with production adapters.
///
/// # Errors
///
/// Returns an error on configuration problems. Contract violations and
/// transport failures are part of the returned report.
pub async fn run_harness(
    config: HarnessConfig,
    fixture: OrderFixture,
    contracts: ContractBook,
) -> Result<ScenarioReport, HarnessError> {
    let client = ReqwestHttpClient::new(&config)?;
    let scenario = ContractScenario::new(
        Arc::new(client),
        Arc::new(ContractVerifier::new()),
        Arc::new(SystemClock::new()),
        config,
        contracts,
        fixture,
    );
    Ok(scenario.run().await?)
}
