//! HTTP client for the Distributed API.
//!
//! Every call is a `POST <base><prefix><endpoint>` with a JSON body. A 200
//! response is decoded into the caller's type; a 500 response becomes
//! [`ApiError::Server`] with the unwrapped message; anything else is
//! [`ApiError::UnexpectedStatus`]. Dropping the returned future cancels the
//! request.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use super::error::{server_error_message, ApiError};
use crate::config::ApiConfig;
use crate::{DistributedError, Result};

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Client for the Distributed API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    root: String,
}

impl ApiClient {
    /// Create a client from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        let root = format!("{}{}", base.as_str().trim_end_matches('/'), config.prefix);

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DistributedError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, root })
    }

    /// The address every endpoint name is appended to.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Address of an endpoint: the API root concatenated with its name.
    pub fn endpoint_url(&self, endpoint: &str) -> std::result::Result<Url, ApiError> {
        let address = format!("{}{}", self.root, endpoint);
        Url::parse(&address)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint address {address}: {e}")))
    }

    /// Call an endpoint and decode the 200 response body as `T`.
    pub async fn call<Req, T>(&self, endpoint: &str, request: &Req) -> std::result::Result<T, ApiError>
    where
        Req: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        let body = serde_json::to_vec(request).map_err(|e| ApiError::Encode(e.to_string()))?;

        debug!(endpoint, "calling API");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read response: {e}")))?;
        trace!(endpoint, %status, body = %text, "API response");

        match status {
            StatusCode::OK => serde_json::from_str(&text)
                .map_err(|e| ApiError::Decode(format!("{endpoint}: {e}"))),
            StatusCode::INTERNAL_SERVER_ERROR => Err(ApiError::Server {
                message: server_error_message(&text)?,
            }),
            other => Err(ApiError::UnexpectedStatus(other.as_u16())),
        }
    }

    /// Call an endpoint and return the 200 response body as untyped JSON.
    pub async fn call_value<Req>(&self, endpoint: &str, request: &Req) -> std::result::Result<Value, ApiError>
    where
        Req: Serialize + ?Sized,
    {
        self.call(endpoint, request).await
    }
}
