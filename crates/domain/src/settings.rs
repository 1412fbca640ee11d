//! Harness configuration.
//!
//! Set once when the harness is constructed and read-only afterwards.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::operation::Operation;
use crate::request::Headers;

/// Deployment root of the public petstore order API.
pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2/store";

/// Immutable configuration shared by every component of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Base URI every operation path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout owned by the HTTP client, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Names of the operations to run. Always executed in scenario order.
    #[serde(default = "default_operations")]
    pub operations: Vec<String>,

    /// Optional JSON file replacing the built-in contracts.
    #[serde(default)]
    pub contracts_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("petstore-contract/{}", env!("CARGO_PKG_VERSION"))
}

fn default_operations() -> Vec<String> {
    Operation::all()
        .iter()
        .map(|op| op.as_str().to_string())
        .collect()
}

impl HarnessConfig {
    /// Creates a configuration for the given base URI with default values.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates the base URI and returns it parsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is malformed or not http(s).
    pub fn parse_base_url(&self) -> DomainResult<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DomainError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Joins an operation path onto the base URI.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Returns the header template sent with every request.
    #[must_use]
    pub fn request_headers(&self) -> Headers {
        Headers::new().with("Content-Type", "application/json")
    }

    /// Resolves the configured operation names, deduplicated and sorted
    /// into scenario order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownOperation` for the first name that is not recognized.
    pub fn selected_operations(&self) -> DomainResult<Vec<Operation>> {
        let mut operations = self
            .operations
            .iter()
            .map(|name| name.parse::<Operation>())
            .collect::<DomainResult<Vec<_>>>()?;
        operations.sort();
        operations.dedup();
        Ok(operations)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            operations: default_operations(),
            contracts_path: None,
        }
    }
}
