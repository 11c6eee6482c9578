//! Fleet-wide snapshot state.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::client::ApiClient;
use crate::domain::types::DashboardData;

/// Holds the current dashboard snapshot. The held value is always concrete —
/// an all-zero record before the first successful fetch — so views never
/// branch on presence.
pub struct DashboardStore {
    api: Arc<ApiClient>,
    dashboard: RwLock<DashboardData>,
}

impl DashboardStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            dashboard: RwLock::new(DashboardData::default()),
        }
    }

    /// Refresh the snapshot, replacing it wholesale on success. Failures are
    /// logged and leave the stale snapshot in place. Always resolves.
    pub async fn fetch_dashboard(&self) {
        match self.api.fetch_dashboard().await {
            Ok(data) => *self.dashboard.write().await = data,
            Err(e) => warn!(error = %e, "failed to fetch dashboard"),
        }
    }

    pub async fn dashboard(&self) -> DashboardData {
        self.dashboard.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{envelope, error_envelope, sample_dashboard, serve};
    use axum::routing::get;
    use axum::{Json, Router};

    async fn store_against(app: Router) -> DashboardStore {
        let base = serve(app).await;
        DashboardStore::new(Arc::new(ApiClient::new(&base).unwrap()))
    }

    #[tokio::test]
    async fn starts_concrete_and_zeroed() {
        let store = store_against(Router::new()).await;
        assert_eq!(store.dashboard().await, DashboardData::default());
    }

    #[tokio::test]
    async fn fetch_replaces_snapshot_wholesale() {
        let app = Router::new().route(
            "/api/dashboard",
            get(|| async { Json(envelope(sample_dashboard())) }),
        );
        let store = store_against(app).await;

        store.fetch_dashboard().await;
        let d = store.dashboard().await;
        assert_eq!(d.current_nodes, 3);
        assert_eq!(d.hourly.len(), 1);
        assert_eq!(d.hourly[0].id, 13);
    }

    #[tokio::test]
    async fn failure_keeps_stale_snapshot_and_resolves() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let app = Router::new().route(
            "/api/dashboard",
            get(|| async {
                if CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(Json(envelope(sample_dashboard())))
                } else {
                    Err((
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                        Json(error_envelope(500, "metric source down")),
                    ))
                }
            }),
        );
        let store = store_against(app).await;

        store.fetch_dashboard().await;
        let before = store.dashboard().await;
        assert_eq!(before.current_nodes, 3);

        store.fetch_dashboard().await;
        assert_eq!(store.dashboard().await, before);
    }

    #[tokio::test]
    async fn refetch_with_unchanged_backend_is_idempotent() {
        let app = Router::new().route(
            "/api/dashboard",
            get(|| async { Json(envelope(sample_dashboard())) }),
        );
        let store = store_against(app).await;

        store.fetch_dashboard().await;
        let first = store.dashboard().await;
        store.fetch_dashboard().await;
        assert_eq!(store.dashboard().await, first);
    }
}
