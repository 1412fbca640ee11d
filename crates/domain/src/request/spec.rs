//! Request specification type

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};
use crate::fixture::OrderFixture;
use crate::operation::Operation;
use crate::settings::HarnessConfig;

/// Fully specified HTTP request for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Operation this request exercises
    pub operation: Operation,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
}

impl RequestSpec {
    /// Builds the request for `operation`.
    ///
    /// `order_id` addresses `GetOrderById` and `DeleteOrderById`;
    /// `payload` is the body of `PlaceOrder`. Either is ignored by
    /// operations that do not use it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URI is invalid, or if the
    /// operation needs an order id or payload that was not supplied.
    pub fn build(
        config: &HarnessConfig,
        operation: Operation,
        order_id: Option<i64>,
        payload: Option<&OrderFixture>,
    ) -> DomainResult<Self> {
        config.parse_base_url()?;

        if operation.needs_order_id() && order_id.is_none() {
            return Err(DomainError::MissingOrderId(operation.to_string()));
        }

        let body = if operation.has_body() {
            let payload =
                payload.ok_or_else(|| DomainError::MissingBody(operation.to_string()))?;
            RequestBody::json(payload.to_json()?)
        } else {
            RequestBody::none()
        };

        Ok(Self {
            operation,
            method: operation.method(),
            url: config.url_for(&operation.path(order_id)),
            headers: config.request_headers(),
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_place_order_request() {
        let config = HarnessConfig::default();
        let fixture = OrderFixture::default();
        let req = RequestSpec::build(&config, Operation::PlaceOrder, None, Some(&fixture)).unwrap();

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://petstore.swagger.io/v2/store/order/");
        assert_eq!(req.headers.values("Content-Type"), vec!["application/json"]);
        assert_eq!(req.body.content_type(), Some("application/json"));
        assert_eq!(req.body.content, fixture.to_json().unwrap());
    }

    #[test]
    fn test_id_addressed_requests() {
        let config = HarnessConfig::default();

        let get = RequestSpec::build(&config, Operation::GetOrderById, Some(5), None).unwrap();
        assert_eq!(get.method, HttpMethod::Get);
        assert_eq!(get.url, "https://petstore.swagger.io/v2/store/order/5/");
        assert_eq!(get.body, RequestBody::none());

        let delete =
            RequestSpec::build(&config, Operation::DeleteOrderById, Some(5), None).unwrap();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, "https://petstore.swagger.io/v2/store/order/5/");
    }

    #[test]
    fn test_inventory_request() {
        let config = HarnessConfig::default();
        let req = RequestSpec::build(&config, Operation::GetInventory, None, None).unwrap();
        assert_eq!(req.url, "https://petstore.swagger.io/v2/store/inventory/");
        assert_eq!(req.body, RequestBody::none());
    }

    #[test]
    fn test_missing_order_id() {
        let config = HarnessConfig::default();
        let result = RequestSpec::build(&config, Operation::DeleteOrderById, None, None);
        assert_eq!(
            result,
            Err(DomainError::MissingOrderId("DeleteOrderById".to_string()))
        );
    }

    #[test]
    fn test_missing_body() {
        let config = HarnessConfig::default();
        let result = RequestSpec::build(&config, Operation::PlaceOrder, None, None);
        assert_eq!(result, Err(DomainError::MissingBody("PlaceOrder".to_string())));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = HarnessConfig::with_base_url("not-a-valid-url");
        let result = RequestSpec::build(&config, Operation::GetInventory, None, None);
        assert!(matches!(result, Err(DomainError::InvalidUrl(_))));
    }
}
