//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building requests or contracts.
///
/// Every variant is a configuration error: it is raised before any request
/// is sent and is never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The operation name is not one of the four known operations.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// An id-addressed operation was built without an order id.
    #[error("operation {0} requires an order id")]
    MissingOrderId(String),

    /// A body-carrying operation was built without a payload.
    #[error("operation {0} requires a request body")]
    MissingBody(String),

    /// The fixture payload could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A contract file stores a contract under another operation's slot.
    #[error("contract slot {slot} holds a contract for {found}")]
    MisplacedContract {
        /// Slot the contract was read from.
        slot: String,
        /// Operation the contract declares.
        found: String,
    },

    /// A fixture timestamp is not valid RFC 3339.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The rejected timestamp.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
