//! Fleet node state: the node list, the leaderboard, and the write paths.
//!
//! Read actions record failures in the `error` field and always resolve, so
//! a background refresh can never take a view down. Write actions record the
//! failure AND return it, so the initiating view can react.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::client::ApiClient;
use crate::domain::node::{Node, NodeUpdate};
use crate::domain::types::NodeMetricRank;

/// Substring the backend relays when a reset request reaches a node that has
/// stopped answering with well-formed JSON.
const OFFLINE_MARKER: &str = "invalid character";

/// A secret reset failed in the way that, in practice, means the node went
/// offline mid-reset.
#[derive(Debug, Error)]
#[error("failed to reset node secret: the node is likely offline")]
pub struct NodeOfflineError;

#[derive(Debug, Default)]
struct NodeState {
    nodes: Vec<Node>,
    ranks: Vec<NodeMetricRank>,
    loading: bool,
    error: Option<String>,
    /// How many periodic refreshes views have run this session. Display
    /// bookkeeping only; unrelated to any transport retry.
    refresh_count: u64,
}

pub struct NodeStore {
    api: Arc<ApiClient>,
    state: RwLock<NodeState>,
}

impl NodeStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: RwLock::new(NodeState::default()),
        }
    }

    /// Refresh the node list. `loading` is raised for the duration of the
    /// call and dropped on both outcomes; a failure lands in `error` and the
    /// previous list stays.
    pub async fn fetch_nodes(&self) {
        self.state.write().await.loading = true;
        let result = self.api.fetch_nodes().await;

        let mut state = self.state.write().await;
        match result {
            Ok(nodes) => state.nodes = nodes,
            Err(e) => state.error = Some(format!("{:#}", e)),
        }
        state.loading = false;
    }

    /// Refresh the leaderboard, same contract as [`fetch_nodes`].
    ///
    /// [`fetch_nodes`]: NodeStore::fetch_nodes
    pub async fn fetch_node_ranks(&self) {
        self.state.write().await.loading = true;
        let result = self.api.fetch_node_ranks().await;

        let mut state = self.state.write().await;
        match result {
            Ok(ranks) => state.ranks = ranks,
            Err(e) => state.error = Some(format!("{:#}", e)),
        }
        state.loading = false;
    }

    /// Push a partial update, then refetch the full list so local state
    /// matches the backend — there is no optimistic merge. A failed update
    /// is recorded in `error` and returned to the caller.
    pub async fn update_node(&self, node_id: &str, update: &NodeUpdate) -> Result<()> {
        match self.api.update_node(node_id, update).await {
            Ok(()) => {
                self.fetch_nodes().await;
                Ok(())
            }
            Err(e) => {
                self.state.write().await.error = Some(format!("{:#}", e));
                Err(e)
            }
        }
    }

    /// Issue a new secret for a node and return it. A failure whose error
    /// chain carries [`OFFLINE_MARKER`] is rewritten into
    /// [`NodeOfflineError`]; anything else passes through untouched.
    pub async fn reset_secret(&self, node_id: &str) -> Result<String> {
        match self.api.reset_node_secret(node_id).await {
            Ok(secret) => Ok(secret),
            Err(e) if format!("{:#}", e).contains(OFFLINE_MARKER) => {
                Err(anyhow!(NodeOfflineError))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn increment_refresh_count(&self) {
        self.state.write().await.refresh_count += 1;
    }

    pub async fn reset_refresh_count(&self) {
        self.state.write().await.refresh_count = 0;
    }

    // ── Snapshot accessors ─────────────────────────────────

    pub async fn nodes(&self) -> Vec<Node> {
        self.state.read().await.nodes.clone()
    }

    pub async fn ranks(&self) -> Vec<NodeMetricRank> {
        self.state.read().await.ranks.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn refresh_count(&self) -> u64 {
        self.state.read().await.refresh_count
    }

    /// Look a node up by its stable id or legacy alias.
    pub async fn find_node(&self, id: &str) -> Option<Node> {
        self.state
            .read()
            .await
            .nodes
            .iter()
            .find(|n| n.matches_id(id))
            .cloned()
    }
}
