//! In-process HTTP fixtures for client and store tests.

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve a router on an ephemeral local port, returning its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Success envelope as the backend shapes it.
pub fn envelope(data: Value) -> Value {
    json!({"code": 200, "msg": "success", "data": data, "time": 1709380496})
}

/// Error envelope: null data, message in `msg`.
pub fn error_envelope(code: u16, msg: &str) -> Value {
    json!({"code": code, "msg": msg, "data": null, "time": 1709380496})
}

/// A minimal but complete node payload.
pub fn sample_node(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "fullSize": false,
        "bandwidth": 100.0,
        "measureBandwidth": 256.0,
        "isEnabled": true,
        "trust": 1000,
        "createdAt": "2024-03-01T12:00:00.000Z",
        "updatedAt": "2024-03-02T12:00:00.000Z",
        "lastActivity": "2024-03-02T12:34:56.000Z",
        "user": "u123",
        "endpoint": {"host": "edge.example.net", "port": 4000, "proto": "https", "byoc": false},
        "noFastEnable": false,
        "uptime": "2024-03-02T00:00:00.000Z",
        "version": "1.9.7",
        "isBanned": false
    })
}

/// A minimal leaderboard entry for `id`.
pub fn sample_rank(id: &str, name: &str, bytes: u64) -> Value {
    json!({
        "_id": id,
        "name": name,
        "isEnabled": true,
        "user": {"name": "alice"},
        "metric": {
            "_id": format!("m-{id}"),
            "clusterId": id,
            "date": "2024-03-02",
            "__v": 0,
            "bytes": bytes,
            "hits": 42
        }
    })
}

/// A small dashboard payload with one hourly bucket.
pub fn sample_dashboard() -> Value {
    json!({
        "currentNodes": 3,
        "currentBandwidth": 1536.0,
        "bandwidth": 2048.0,
        "bytes": 1099511627776u64,
        "hits": 987654,
        "load": 0.42,
        "hourly": [
            {"_id": 13, "bytes": 1073741824u64, "hits": 1000, "bandwidth": 800.0, "nodes": 3}
        ]
    })
}
