//! Application error types

use petstore_contract_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The harness is misconfigured; nothing was sent.
    #[error("configuration error: {0}")]
    Configuration(#[from] DomainError),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
