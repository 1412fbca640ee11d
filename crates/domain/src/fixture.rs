//! Literal order fixture posted by the create step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Output format the order API uses for timestamps.
const SERVER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// The purchase order payload sent to `POST /order/`.
///
/// Field order matches the wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFixture {
    /// Order id, also the path parameter of the read and delete steps.
    pub id: i64,
    /// Id of the ordered pet.
    pub pet_id: i64,
    /// Ordered quantity.
    pub quantity: i64,
    /// Ship date as an RFC 3339 timestamp.
    pub ship_date: String,
    /// Order status. The upstream contract spells it "avaiable".
    pub status: String,
    /// Whether the order is complete.
    pub complete: bool,
}

impl OrderFixture {
    /// Serializes the fixture into the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::InvalidBody(e.to_string()))
    }

    /// Returns the ship date as the server echoes it back.
    ///
    /// The server answers in UTC with a numeric `+0000` offset, so
    /// `2022-10-05T01:22:06.626Z` becomes `2022-10-05T01:22:06.626+0000`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture ship date is not RFC 3339.
    pub fn server_ship_date(&self) -> DomainResult<String> {
        normalize_timestamp(&self.ship_date)
    }
}

impl Default for OrderFixture {
    fn default() -> Self {
        Self {
            id: 5,
            pet_id: 15,
            quantity: 35,
            ship_date: "2022-10-05T01:22:06.626Z".to_string(),
            status: "avaiable".to_string(),
            complete: true,
        }
    }
}

/// Converts an RFC 3339 timestamp into the server's UTC `+0000` notation.
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed.
pub fn normalize_timestamp(value: &str) -> DomainResult<String> {
    let parsed =
        DateTime::parse_from_rfc3339(value).map_err(|e| DomainError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
    Ok(parsed
        .with_timezone(&Utc)
        .format(SERVER_TIMESTAMP_FORMAT)
        .to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_fixture_payload() {
        let json = OrderFixture::default().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"id":5,"petId":15,"quantity":35,"shipDate":"2022-10-05T01:22:06.626Z","status":"avaiable","complete":true}"#
        );
    }

    #[test]
    fn test_server_ship_date() {
        let fixture = OrderFixture::default();
        assert_eq!(
            fixture.server_ship_date().unwrap(),
            "2022-10-05T01:22:06.626+0000"
        );
    }

    #[test]
    fn test_normalize_offset_to_utc() {
        assert_eq!(
            normalize_timestamp("2022-10-05T03:22:06.626+02:00").unwrap(),
            "2022-10-05T01:22:06.626+0000"
        );
        assert_eq!(
            normalize_timestamp("2022-10-05T01:22:06Z").unwrap(),
            "2022-10-05T01:22:06.000+0000"
        );
    }

    #[test]
    fn test_invalid_timestamp() {
        let result = normalize_timestamp("yesterday");
        assert!(matches!(result, Err(DomainError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_fixture_from_camel_case() {
        let fixture: OrderFixture = serde_json::from_str(
            r#"{"id":7,"petId":1,"quantity":2,"shipDate":"2023-01-01T00:00:00.000Z","status":"placed","complete":false}"#,
        )
        .unwrap();
        assert_eq!(fixture.id, 7);
        assert_eq!(fixture.pet_id, 1);
        assert!(!fixture.complete);
    }
}
