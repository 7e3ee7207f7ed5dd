//! Thin wrapper over the server's HTTP endpoints
//!
//! Every call passes the token as a query parameter. Fetches fail on any
//! non-success status; writes report rejections as an [`Outcome`] so callers
//! can carry on with the next record.

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    model::{ApiResponse, LeaseIdentifier, LeaseList, ReservationRequest, Scope},
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

pub const LIST_LEASES: &str = "dhcp/leases/list";
pub const REMOVE_LEASE: &str = "dhcp/leases/remove";
pub const GET_SCOPE: &str = "dhcp/scopes/get";
pub const ADD_RESERVED_LEASE: &str = "dhcp/scopes/addReservedLease";

/// Result of a write call that the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected { status: StatusCode, body: String },
}

pub struct ApiClient {
    config: ClientConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http(config, Client::new())
    }

    /// Uses a caller-built HTTP client (proxy, TLS or timeout settings).
    pub fn with_http(config: ClientConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.config.endpoint(path);
        tracing::debug!("GET {}", url);
        let body = self
            .http
            .get(&url)
            .query(&[("token", self.config.token.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        serde_json::from_str(&body).map_err(|e| Error::json(path, e))
    }

    async fn post(&self, path: &str, params: &[(&str, &str)]) -> Result<Outcome> {
        let url = self.config.endpoint(path);
        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .query(&[("token", self.config.token.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Outcome::Accepted);
        }
        let body = response.text().await?;
        tracing::debug!("POST {} rejected with {}", path, status);
        Ok(Outcome::Rejected { status, body })
    }

    /// Current leases, exactly as the server reported them.
    pub async fn list_leases(&self) -> Result<Vec<serde_json::Value>> {
        let envelope: ApiResponse<LeaseList> = self.get_json(LIST_LEASES, &[]).await?;
        Ok(envelope.response.leases)
    }

    pub async fn get_scope(&self, name: &str) -> Result<Scope> {
        let envelope: ApiResponse<Scope> = self.get_json(GET_SCOPE, &[("name", name)]).await?;
        Ok(envelope.response)
    }

    pub async fn add_reserved_lease(&self, request: &ReservationRequest) -> Result<Outcome> {
        let mut params = vec![
            ("name", request.scope_name()),
            ("hardwareAddress", request.hardware_address.as_str()),
            ("ipAddress", request.address.as_str()),
        ];
        if let Some(host_name) = &request.host_name {
            params.push(("hostName", host_name.as_str()));
        }
        if let Some(comments) = &request.comments {
            params.push(("comments", comments.as_str()));
        }
        self.post(ADD_RESERVED_LEASE, &params).await
    }

    /// Removes a lease; without an identifier only the scope name is sent.
    pub async fn remove_lease(
        &self,
        scope: &str,
        identifier: Option<LeaseIdentifier<'_>>,
    ) -> Result<Outcome> {
        let mut params = vec![("name", scope)];
        if let Some(id) = identifier {
            params.push(id.as_param());
        }
        self.post(REMOVE_LEASE, &params).await
    }
}
