//! Typed HTTP client for the fleet dashboard API.
//!
//! Every response body arrives wrapped in a `{code, msg, data, time}`
//! envelope; only `data` carries the payload. Transport failures and non-2xx
//! statuses surface as errors untouched — no retries, no status translation.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::node::{Node, NodeUpdate};
use crate::domain::types::{DashboardData, NodeMetricRank, User};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error-path envelope: `data` is null, `msg` carries the backend's text.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: String,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    secret: String,
}

pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn fetch_user(&self) -> Result<User> {
        self.get("/api/user").await
    }

    /// Fetch the full node collection. Insertion order is the server's and
    /// is not guaranteed stable across calls.
    pub async fn fetch_nodes(&self) -> Result<Vec<Node>> {
        self.get("/api/nodes").await
    }

    /// Apply a partial update to one node. The response body is discarded;
    /// callers refetch the node list to observe the result.
    pub async fn update_node(&self, node_id: &str, update: &NodeUpdate) -> Result<()> {
        let url = format!("{}/api/nodes/{}", self.base_url, node_id);
        let resp = self
            .http
            .patch(&url)
            .json(update)
            .send()
            .await
            .with_context(|| format!("PATCH {}", url))?;

        Self::check_status(&url, resp).await?;
        Ok(())
    }

    /// Issue a new connection secret for one node. The secret is only
    /// visible in this response and cannot be re-retrieved.
    pub async fn reset_node_secret(&self, node_id: &str) -> Result<String> {
        let url = format!("{}/api/nodes/{}/reset-secret", self.base_url, node_id);
        let resp = self
            .http
            .patch(&url)
            .send()
            .await
            .with_context(|| format!("PATCH {}", url))?;

        let payload: SecretPayload = Self::unwrap_envelope(&url, resp).await?;
        Ok(payload.secret)
    }

    pub async fn fetch_dashboard(&self) -> Result<DashboardData> {
        self.get("/api/dashboard").await
    }

    /// Fetch the leaderboard, in server order.
    pub async fn fetch_node_ranks(&self) -> Result<Vec<NodeMetricRank>> {
        self.get("/api/nodes/rank").await
    }

    // ── Internal helpers ───────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;

        Self::unwrap_envelope(&url, resp).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        url: &str,
        resp: reqwest::Response,
    ) -> Result<T> {
        let resp = Self::check_status(url, resp).await?;
        let envelope: Envelope<T> = resp
            .json()
            .await
            .with_context(|| format!("parsing response from {}", url))?;
        Ok(envelope.data)
    }

    /// Fail on non-2xx, quoting the backend's envelope `msg` when present.
    async fn check_status(url: &str, resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let msg = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.msg)
            .unwrap_or(body);
        if msg.is_empty() {
            bail!("{} returned {}", url, status);
        }
        bail!("{} returned {}: {}", url, status, msg);
    }
}
