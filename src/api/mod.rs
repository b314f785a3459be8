pub mod mock;
pub mod schema;

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::validation::AccountNumber;
use schema::{PortfolioSummary, TransactionHistory};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Portfolio,
    Transactions,
}

impl Resource {
    fn segment(self) -> &'static str {
        match self {
            Resource::Portfolio => "portfolio",
            Resource::Transactions => "transactions",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Portfolio => "portfolio",
            Resource::Transactions => "transaction",
        })
    }
}

/// Every failure a lookup can end in. The `Display` text is what the
/// banner shows.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400 with a server-provided reason.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("Unable to connect to the server. Please ensure the backend is running.")]
    Connectivity,
    #[error("An unexpected error occurred while fetching {0} data.")]
    Unexpected(Resource),
}

/// Where portfolio data comes from. Implementations are called from worker
/// threads, one request per call.
pub trait PortfolioSource: Send + Sync {
    fn portfolio(&self, account: &AccountNumber) -> Result<PortfolioSummary, ApiError>;
    fn transactions(&self, account: &AccountNumber) -> Result<TransactionHistory, ApiError>;
}

pub struct ApiClient {
    base_url: String,
    #[cfg(feature = "network")]
    client: reqwest::blocking::Client,
}

impl ApiClient {
    #[cfg(feature = "network")]
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[cfg(not(feature = "network"))]
    pub fn new(base_url: &str, _timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, resource: Resource, account: &AccountNumber) -> String {
        format!("{}/{}/{}", self.base_url, resource.segment(), account)
    }

    #[cfg(feature = "network")]
    fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        account: &AccountNumber,
    ) -> Result<T, ApiError> {
        use reqwest::StatusCode;

        let url = self.url(resource, account);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().map_err(|err| {
            tracing::warn!(%url, error = %err, "request failed");
            if err.is_connect() || err.is_timeout() {
                ApiError::Connectivity
            } else {
                ApiError::Unexpected(resource)
            }
        })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let detail = response
                .json::<schema::ErrorBody>()
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| "Invalid account number".to_string());
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        response.json::<T>().map_err(|err| {
            tracing::warn!(%url, error = %err, "undecodable response body");
            ApiError::Unexpected(resource)
        })
    }

    #[cfg(not(feature = "network"))]
    fn get<T: DeserializeOwned>(
        &self,
        _resource: Resource,
        _account: &AccountNumber,
    ) -> Result<T, ApiError> {
        Err(ApiError::Connectivity)
    }
}

impl PortfolioSource for ApiClient {
    fn portfolio(&self, account: &AccountNumber) -> Result<PortfolioSummary, ApiError> {
        self.get(Resource::Portfolio, account)
    }

    fn transactions(&self, account: &AccountNumber) -> Result<TransactionHistory, ApiError> {
        self.get(Resource::Transactions, account)
    }
}
