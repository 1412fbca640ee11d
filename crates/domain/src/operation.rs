//! The four operations exercised against the order API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};
use crate::request::HttpMethod;

/// An operation of the order API.
///
/// The set is closed: there is no way to register further operations at
/// runtime. The declaration order is the canonical scenario order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    /// `POST /order/` with the fixture payload.
    PlaceOrder,
    /// `GET /order/{id}/`.
    GetOrderById,
    /// `DELETE /order/{id}/`.
    DeleteOrderById,
    /// `GET /inventory/`.
    GetInventory,
}

impl Operation {
    /// Returns all operations in scenario order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PlaceOrder,
            Self::GetOrderById,
            Self::DeleteOrderById,
            Self::GetInventory,
        ]
    }

    /// Returns the HTTP method used by this operation.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::PlaceOrder => HttpMethod::Post,
            Self::GetOrderById | Self::GetInventory => HttpMethod::Get,
            Self::DeleteOrderById => HttpMethod::Delete,
        }
    }

    /// Returns whether the path is addressed by an order id.
    #[must_use]
    pub const fn needs_order_id(self) -> bool {
        matches!(self, Self::GetOrderById | Self::DeleteOrderById)
    }

    /// Returns whether the operation sends a JSON payload.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::PlaceOrder)
    }

    /// Returns the path below the base URI.
    ///
    /// `order_id` is only used by id-addressed operations.
    #[must_use]
    pub fn path(self, order_id: Option<i64>) -> String {
        match (self, order_id) {
            (Self::PlaceOrder, _) => "/order/".to_string(),
            (Self::GetOrderById | Self::DeleteOrderById, Some(id)) => format!("/order/{id}/"),
            (Self::GetOrderById | Self::DeleteOrderById, None) => "/order/{id}/".to_string(),
            (Self::GetInventory, _) => "/inventory/".to_string(),
        }
    }

    /// Returns the operation name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlaceOrder => "PlaceOrder",
            Self::GetOrderById => "GetOrderById",
            Self::DeleteOrderById => "DeleteOrderById",
            Self::GetInventory => "GetInventory",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    /// Parses an operation name, ignoring ASCII case, `-` and `_`.
    fn from_str(s: &str) -> DomainResult<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "placeorder" => Ok(Self::PlaceOrder),
            "getorderbyid" => Ok(Self::GetOrderById),
            "deleteorderbyid" => Ok(Self::DeleteOrderById),
            "getinventory" => Ok(Self::GetInventory),
            _ => Err(DomainError::UnknownOperation(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_operation_from_str() {
        assert_eq!("PlaceOrder".parse::<Operation>().unwrap(), Operation::PlaceOrder);
        assert_eq!("get_order_by_id".parse::<Operation>().unwrap(), Operation::GetOrderById);
        assert_eq!("delete-order-by-id".parse::<Operation>().unwrap(), Operation::DeleteOrderById);
        assert_eq!("GETINVENTORY".parse::<Operation>().unwrap(), Operation::GetInventory);
    }

    #[test]
    fn test_unknown_operation() {
        let result = "UpdateOrder".parse::<Operation>();
        assert_eq!(
            result,
            Err(DomainError::UnknownOperation("UpdateOrder".to_string()))
        );
    }

    #[test]
    fn test_methods_and_paths() {
        assert_eq!(Operation::PlaceOrder.method(), HttpMethod::Post);
        assert_eq!(Operation::PlaceOrder.path(None), "/order/");
        assert_eq!(Operation::GetOrderById.method(), HttpMethod::Get);
        assert_eq!(Operation::GetOrderById.path(Some(5)), "/order/5/");
        assert_eq!(Operation::DeleteOrderById.method(), HttpMethod::Delete);
        assert_eq!(Operation::DeleteOrderById.path(Some(5)), "/order/5/");
        assert_eq!(Operation::GetInventory.path(Some(5)), "/inventory/");
    }

    #[test]
    fn test_scenario_order() {
        let mut shuffled = vec![
            Operation::GetInventory,
            Operation::PlaceOrder,
            Operation::DeleteOrderById,
            Operation::GetOrderById,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Operation::all());
    }
}
