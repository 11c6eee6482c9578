//! Shared value types for the dashboard API: the logged-in user, the
//! fleet-wide snapshot, and the server-computed leaderboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::node::NodeSponsor;

/// Display identity of the logged-in operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub username: String,
    pub avatar: String,
}

/// Aggregate fleet-wide statistics at a point in time.
///
/// Replaced wholesale on every fetch; the store keeps an all-zero default
/// before the first successful fetch, never a null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub current_nodes: u64,
    /// Aggregate outbound bandwidth right now, in Mbps.
    pub current_bandwidth: f64,
    /// 95th-percentile style aggregate bandwidth figure, in Mbps.
    pub bandwidth: f64,
    pub bytes: u64,
    pub hits: u64,
    /// Load fraction, nominally 0.0..=1.0.
    pub load: f64,
    pub hourly: Vec<HourlyMetric>,
}

/// One hour bucket of the dashboard time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HourlyMetric {
    /// Hour-of-day bucket.
    #[serde(rename = "_id")]
    pub id: u32,
    pub bytes: u64,
    pub hits: u64,
    pub bandwidth: f64,
    pub nodes: u32,
}

/// A node's position in the server-ordered leaderboard, joining identity and
/// status fields with the ranking metric. Ordering is decided server-side
/// and never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetricRank {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub full_size: Option<bool>,
    pub is_enabled: bool,
    #[serde(default)]
    pub user: Option<RankUser>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub down_reason: Option<String>,
    #[serde(default)]
    pub downtime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sponsor: Option<NodeSponsor>,
    pub metric: RankMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankUser {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankMetric {
    #[serde(rename = "_id")]
    pub id: String,
    pub cluster_id: String,
    /// Metric day, as the backend formats it.
    pub date: String,
    #[serde(rename = "__v")]
    pub version: u32,
    pub bytes: u64,
    pub hits: u64,
}
