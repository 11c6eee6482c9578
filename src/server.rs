//! Local dashboard viewer.
//!
//! Serves exactly two routes: `/` renders the current store state, anything
//! else is the not-found page. Data is pulled from the backend by store
//! actions — an initial fetch at startup plus an optional background refresh
//! loop — and requests render whatever the stores hold.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::ApiClient;
use crate::config::Config;
use crate::domain::Stores;
use crate::format::{format_bandwidth, format_bytes, format_load};

pub async fn run(config: Config, addr: &str) -> Result<()> {
    let api = Arc::new(ApiClient::new(&config.base_url)?);
    let stores = Arc::new(Stores::new(api));

    info!(base_url = %config.base_url, "fetching initial state");
    stores.user.fetch_user().await;
    stores.dashboard.fetch_dashboard().await;
    stores.node.fetch_nodes().await;

    if config.refresh_interval_secs > 0 {
        let refresh = stores.clone();
        let interval_secs = config.refresh_interval_secs;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            // Skip the first tick — the initial fetch above covers it
            interval.tick().await;
            loop {
                interval.tick().await;
                refresh.dashboard.fetch_dashboard().await;
                refresh.node.fetch_nodes().await;
                refresh.node.increment_refresh_count().await;
            }
        });
    }

    let app = router(stores);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    info!(addr = %addr, "viewer listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("viewer server error")?;

    info!("viewer stopped");
    Ok(())
}

pub fn router(stores: Arc<Stores>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(stores)
}

async fn dashboard_page(State(stores): State<Arc<Stores>>) -> Html<String> {
    let dashboard = stores.dashboard.dashboard().await;
    let nodes = stores.node.nodes().await;
    let user = stores.user.user().await;
    let refreshes = stores.node.refresh_count().await;

    let operator = user
        .map(|u| format!("{} ({})", u.name, u.username))
        .unwrap_or_else(|| "unknown operator".to_string());

    let mut node_rows = String::new();
    for node in &nodes {
        let status = if node.is_banned {
            "banned"
        } else if node.is_enabled {
            "online"
        } else {
            "offline"
        };
        node_rows.push_str(&format!(
            "<tr><td>{}</td><td class=\"{status}\">{status}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            node.name,
            format_bandwidth(node.bandwidth),
            node.version,
            node.last_activity.format("%Y-%m-%d %H:%M:%S"),
        ));
    }

    Html(format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Fleet Dashboard</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; color: #222; }}
table {{ border-collapse: collapse; }}
td, th {{ padding: 0.3rem 0.8rem; border-bottom: 1px solid #ddd; text-align: left; }}
.online {{ color: #2a7d2a; }}
.offline {{ color: #b03030; }}
.banned {{ color: #b03030; font-weight: bold; }}
.stats span {{ margin-right: 2rem; }}
footer {{ margin-top: 2rem; color: #888; font-size: 0.85rem; }}
</style>
</head>
<body>
<h1>Fleet Dashboard</h1>
<p>Operator: {operator}</p>
<p class="stats">
<span>Online nodes: <b>{current_nodes}</b></span>
<span>Current bandwidth: <b>{current_bandwidth}</b></span>
<span>Total traffic: <b>{bytes}</b></span>
<span>Load: <b>{load}</b></span>
</p>
<h2>Nodes</h2>
<table>
<tr><th>Name</th><th>Status</th><th>Bandwidth</th><th>Version</th><th>Last activity</th></tr>
{node_rows}
</table>
<footer>refreshed {refreshes} times this session</footer>
</body>
</html>
"#,
        current_nodes = dashboard.current_nodes,
        current_bandwidth = format_bandwidth(dashboard.current_bandwidth),
        bytes = format_bytes(dashboard.bytes as f64),
        load = format_load(dashboard.load),
    ))
}

async fn not_found() -> (StatusCode, Html<&'static str>) {
    (
        StatusCode::NOT_FOUND,
        Html(
            "<!doctype html><html><body><h1>404</h1>\
             <p>Nothing here. The dashboard lives at <a href=\"/\">/</a>.</p></body></html>",
        ),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { info!("received Ctrl+C, shutting down"); },
        _ = terminate => { info!("received SIGTERM, shutting down"); },
    }
}
