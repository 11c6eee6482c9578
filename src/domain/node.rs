//! Fleet node model as served by the dashboard API.
//!
//! A `Node` is one fleet member (an edge/storage unit) reporting bandwidth,
//! trust, and status figures. Nodes are fetched in bulk and patched
//! individually; the client never creates or deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fleet member. `id` (wire name `_id`) is the stable identity;
/// `is_banned`/`down_reason` inform on status alongside `is_enabled`
/// without excluding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(rename = "_id")]
    pub id: String,
    /// Alias for `_id` still emitted by older backends.
    #[serde(default, rename = "id")]
    pub legacy_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub full_size: bool,
    /// Configured bandwidth limit in Mbps.
    pub bandwidth: f64,
    /// Bandwidth measured by the backend in Mbps.
    #[serde(default)]
    pub measure_bandwidth: f64,
    #[serde(default)]
    pub shards: Vec<String>,
    pub is_enabled: bool,
    #[serde(default)]
    pub trust: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub down_reason: Option<String>,
    pub last_activity: DateTime<Utc>,
    /// Owning user id.
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub sponsor: Option<NodeSponsor>,
    pub endpoint: NodeEndpoint,
    #[serde(default)]
    pub no_fast_enable: bool,
    /// When the node last came up.
    pub uptime: DateTime<Utc>,
    pub version: String,
    #[serde(default)]
    pub downtime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flavor: Option<NodeFlavor>,
    #[serde(default)]
    pub ban_reason: Option<String>,
    #[serde(default)]
    pub is_banned: bool,
}

impl Node {
    /// Match against the stable id or the legacy alias.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || self.legacy_id.as_deref() == Some(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEndpoint {
    pub host: String,
    pub port: u16,
    pub proto: String,
    pub byoc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSponsor {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub banner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeFlavor {
    pub runtime: String,
    pub storage: String,
}

/// Partial update body for `PATCH /api/nodes/{id}`.
///
/// Fields left as `None` are not serialized, so the backend leaves them
/// unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<NodeSponsor>,
}

impl NodeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.bandwidth.is_none() && self.sponsor.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_deserializes_wire_names() {
        let json = r#"{
            "_id": "65f0c1",
            "name": "edge-01",
            "fullSize": true,
            "bandwidth": 100,
            "measureBandwidth": 312.5,
            "isEnabled": true,
            "trust": 1200,
            "createdAt": "2024-03-01T12:00:00.000Z",
            "updatedAt": "2024-03-02T12:00:00.000Z",
            "lastActivity": "2024-03-02T12:34:56.000Z",
            "user": "u123",
            "endpoint": {"host": "edge-01.example.net", "port": 4000, "proto": "https", "byoc": false},
            "noFastEnable": false,
            "uptime": "2024-03-02T00:00:00.000Z",
            "version": "1.9.7",
            "isBanned": false
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, "65f0c1");
        assert_eq!(node.legacy_id, None);
        assert!(node.full_size);
        assert_eq!(node.bandwidth, 100.0);
        assert_eq!(node.endpoint.port, 4000);
        assert!(node.sponsor.is_none());
        assert!(node.shards.is_empty());
        assert!(node.matches_id("65f0c1"));
        assert!(!node.matches_id("other"));
    }

    #[test]
    fn legacy_id_also_matches() {
        let json = r#"{
            "_id": "65f0c1",
            "id": "compat-1",
            "name": "edge-01",
            "bandwidth": 100,
            "isEnabled": true,
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z",
            "lastActivity": "2024-03-01T12:00:00Z",
            "endpoint": {"host": "h", "port": 1, "proto": "http", "byoc": true},
            "uptime": "2024-03-01T12:00:00Z",
            "version": "1.0.0"
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert!(node.matches_id("compat-1"));
        assert!(node.matches_id("65f0c1"));
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = NodeUpdate {
            bandwidth: Some(200.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"bandwidth": 200.0}));

        assert!(NodeUpdate::default().is_empty());
        assert!(!update.is_empty());
    }
}
