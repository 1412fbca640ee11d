//! Run Scenario Use Case
//!
//! Drives the four order API operations in their fixed order
//! (create → read → delete → inventory) and verifies every response
//! against its contract. The order id produced by the create step is
//! passed explicitly into the read and delete steps.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use petstore_contract_domain::{
    ContractBook, ExpectedContract, HarnessConfig, Operation, OperationResults, OrderFixture,
    generate_run_id, request::RequestSpec, response::ResponseSpec,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::ports::{Clock, HttpClient, HttpClientError, ResponseVerifier};
use crate::{ApplicationError, ApplicationResult};

/// Outcome of the create step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Check results of the create response.
    pub results: OperationResults,
    /// Order id to address in the following steps.
    pub order_id: i64,
}

/// What happened to one operation of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// A response arrived and was verified.
    Verified(OperationResults),
    /// No response arrived.
    TransportFailed {
        /// Operation that failed.
        operation: Operation,
        /// Transport error.
        error: HttpClientError,
    },
}

impl OperationOutcome {
    /// Returns the operation this outcome belongs to.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Verified(results) => results.operation,
            Self::TransportFailed { operation, .. } => *operation,
        }
    }

    /// Returns true if a response arrived and every check passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        match self {
            Self::Verified(results) => results.all_passed(),
            Self::TransportFailed { .. } => false,
        }
    }
}

/// Report of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Unique id of the run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Base URI the run targeted.
    pub base_url: String,
    /// Outcomes in execution order.
    pub outcomes: Vec<OperationOutcome>,
}

impl ScenarioReport {
    /// Returns true if every operation passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(OperationOutcome::passed)
    }

    /// Returns the outcome of `operation`, if it was run.
    #[must_use]
    pub fn outcome(&self, operation: Operation) -> Option<&OperationOutcome> {
        self.outcomes.iter().find(|o| o.operation() == operation)
    }

    /// Total number of checks run.
    #[must_use]
    pub fn total_checks(&self) -> usize {
        self.verified().map(|r| r.total).sum()
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failed_checks(&self) -> usize {
        self.verified().map(|r| r.failed).sum()
    }

    /// Number of operations that got no response.
    #[must_use]
    pub fn transport_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, OperationOutcome::TransportFailed { .. }))
            .count()
    }

    fn verified(&self) -> impl Iterator<Item = &OperationResults> {
        self.outcomes.iter().filter_map(|o| match o {
            OperationOutcome::Verified(results) => Some(results),
            OperationOutcome::TransportFailed { .. } => None,
        })
    }
}

/// Use case for running the order contract scenario.
///
/// Holds the immutable configuration, contracts and fixture of a run, plus
/// the ports used to reach the API and verify its answers.
///
/// # Example
///
/// ```ignore
/// let scenario = ContractScenario::new(
///     Arc::new(ReqwestHttpClient::new(&config)?),
///     Arc::new(ContractVerifier::new()),
///     Arc::new(SystemClock::new()),
///     config,
///     ContractBook::petstore(&fixture)?,
///     fixture,
/// );
/// let report = scenario.run().await?;
/// ```
pub struct ContractScenario<C: HttpClient, V: ResponseVerifier> {
    client: Arc<C>,
    verifier: Arc<V>,
    clock: Arc<dyn Clock>,
    config: HarnessConfig,
    contracts: ContractBook,
    fixture: OrderFixture,
}

impl<C: HttpClient, V: ResponseVerifier> ContractScenario<C, V> {
    /// Creates a new scenario.
    pub fn new(
        client: Arc<C>,
        verifier: Arc<V>,
        clock: Arc<dyn Clock>,
        config: HarnessConfig,
        contracts: ContractBook,
        fixture: OrderFixture,
    ) -> Self {
        Self {
            client,
            verifier,
            clock,
            config,
            contracts,
            fixture,
        }
    }

    /// Runs the configured operations in scenario order.
    ///
    /// A transport failure is recorded for its operation and the run goes
    /// on with the order id known so far.
    ///
    /// # Errors
    ///
    /// Returns a configuration error, before any request is sent, if an
    /// operation name is unknown or the base URI is invalid.
    pub async fn run(&self) -> ApplicationResult<ScenarioReport> {
        let operations = self.config.selected_operations()?;
        self.config.parse_base_url()?;

        let run_id = generate_run_id();
        let started_at = self.clock.now();
        info!(%run_id, base_url = %self.config.base_url, "starting contract scenario");

        let mut order_id = self.fixture.id;
        let mut outcomes = Vec::with_capacity(operations.len());

        for operation in operations {
            let result = match operation {
                Operation::PlaceOrder => self.place_order().await.map(|placed| {
                    order_id = placed.order_id;
                    placed.results
                }),
                Operation::GetOrderById => self.get_order(order_id).await,
                Operation::DeleteOrderById => self.delete_order(order_id).await,
                Operation::GetInventory => self.get_inventory().await,
            };

            outcomes.push(match result {
                Ok(results) => OperationOutcome::Verified(results),
                Err(ApplicationError::Transport(error)) => {
                    OperationOutcome::TransportFailed { operation, error }
                }
                Err(e @ ApplicationError::Configuration(_)) => return Err(e),
            });
        }

        let report = ScenarioReport {
            run_id,
            started_at,
            base_url: self.config.base_url.clone(),
            outcomes,
        };
        info!(
            %run_id,
            checks = report.total_checks(),
            failed = report.failed_checks(),
            transport_failures = report.transport_failures(),
            "contract scenario finished"
        );
        Ok(report)
    }

    /// Posts the fixture and verifies the created order.
    ///
    /// The returned order id is the one echoed by the server, or the
    /// fixture id when the body carries no integer `id`.
    ///
    /// # Errors
    ///
    /// Returns a transport or configuration error.
    pub async fn place_order(&self) -> ApplicationResult<PlacedOrder> {
        let response = self
            .send(Operation::PlaceOrder, None, Some(&self.fixture))
            .await?;
        let results = self.check(self.contracts.contract(Operation::PlaceOrder), &response);
        let order_id = echoed_order_id(&response.body).unwrap_or(self.fixture.id);
        Ok(PlacedOrder { results, order_id })
    }

    /// Fetches the order `order_id` and verifies it.
    ///
    /// Order-id placeholders of the contract are bound to `order_id`.
    ///
    /// # Errors
    ///
    /// Returns a transport or configuration error.
    pub async fn get_order(&self, order_id: i64) -> ApplicationResult<OperationResults> {
        let response = self
            .send(Operation::GetOrderById, Some(order_id), None)
            .await?;
        let contract = self
            .contracts
            .contract(Operation::GetOrderById)
            .for_order(order_id);
        Ok(self.check(&contract, &response))
    }

    /// Deletes the order `order_id` and verifies the acknowledgement.
    ///
    /// The acknowledgement must name `order_id`, not the fixture id.
    ///
    /// # Errors
    ///
    /// Returns a transport or configuration error.
    pub async fn delete_order(&self, order_id: i64) -> ApplicationResult<OperationResults> {
        let response = self
            .send(Operation::DeleteOrderById, Some(order_id), None)
            .await?;
        let contract = self
            .contracts
            .contract(Operation::DeleteOrderById)
            .for_order(order_id);
        Ok(self.check(&contract, &response))
    }

    /// Fetches the inventory snapshot and verifies it.
    ///
    /// # Errors
    ///
    /// Returns a transport or configuration error.
    pub async fn get_inventory(&self) -> ApplicationResult<OperationResults> {
        let response = self.send(Operation::GetInventory, None, None).await?;
        Ok(self.check(self.contracts.contract(Operation::GetInventory), &response))
    }

    async fn send(
        &self,
        operation: Operation,
        order_id: Option<i64>,
        payload: Option<&OrderFixture>,
    ) -> ApplicationResult<ResponseSpec> {
        let request = RequestSpec::build(&self.config, operation, order_id, payload)?;
        debug!(%operation, method = %request.method, url = %request.url, "sending request");

        self.client.execute(&request).await.map_err(|e| {
            error!(%operation, url = %request.url, error = %e, "transport failure");
            ApplicationError::Transport(e)
        })
    }

    fn check(&self, contract: &ExpectedContract, response: &ResponseSpec) -> OperationResults {
        let operation = contract.operation;
        let results = self.verifier.verify(contract, response);

        for violation in results.violations() {
            warn!(%operation, "{violation}");
        }
        info!(
            %operation,
            status = response.status,
            passed = results.passed,
            failed = results.failed,
            "verified response"
        );
        results
    }
}

fn echoed_order_id(body: &str) -> Option<i64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("id")?
        .as_i64()
}
