//! Response specification type
//!
//! The observed side of a contract check: status line, headers as received
//! and the raw body. Created fresh per executed operation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::request::Headers;

/// HTTP response as received from the order API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Status reason text (e.g., "OK", "Not Found")
    pub status_text: String,
    /// Response headers, every received line in order
    pub headers: Headers,
    /// Response body as string
    pub body: String,
    /// Response time
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a response from raw parts.
    ///
    /// The body is decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: Headers,
        body: &[u8],
        duration: Duration,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body: String::from_utf8_lossy(body).into_owned(),
            duration,
        }
    }

}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Truncation is acceptable: durations over ~584 million years are not realistic
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
