//! Login-session user state.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::client::ApiClient;
use crate::domain::types::User;

/// Holds the last-fetched operator identity for the session. There is no
/// error surface here: a failed refresh keeps the previous value and views
/// render whatever is held.
pub struct UserStore {
    api: Arc<ApiClient>,
    user: RwLock<Option<User>>,
}

impl UserStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            user: RwLock::new(None),
        }
    }

    /// Refresh the current user. Replaces the held value wholesale on
    /// success; logs and keeps prior state on failure. Always resolves.
    pub async fn fetch_user(&self) {
        match self.api.fetch_user().await {
            Ok(user) => *self.user.write().await = Some(user),
            Err(e) => warn!(error = %e, "failed to fetch user"),
        }
    }

    pub async fn user(&self) -> Option<User> {
        self.user.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{envelope, error_envelope, serve};
    use axum::routing::get;
    use axum::{Json, Router};

    fn user_json() -> serde_json::Value {
        serde_json::json!({"name": "Alice", "username": "alice", "avatar": "https://a.test/alice.png"})
    }

    async fn store_against(app: Router) -> UserStore {
        let base = serve(app).await;
        UserStore::new(Arc::new(ApiClient::new(&base).unwrap()))
    }

    #[tokio::test]
    async fn fetch_replaces_user_wholesale() {
        let app = Router::new().route("/api/user", get(|| async { Json(envelope(user_json())) }));
        let store = store_against(app).await;

        assert!(store.user().await.is_none());
        store.fetch_user().await;
        assert_eq!(store.user().await.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn failure_keeps_prior_state_and_resolves() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let app = Router::new().route(
            "/api/user",
            get(|| async {
                if CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(Json(envelope(user_json())))
                } else {
                    Err((
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                        Json(error_envelope(500, "session backend down")),
                    ))
                }
            }),
        );
        let store = store_against(app).await;

        store.fetch_user().await;
        let before = store.user().await;
        assert!(before.is_some());

        // Second call fails server-side; the action still resolves and the
        // held value is untouched.
        store.fetch_user().await;
        assert_eq!(store.user().await, before);
    }

    #[tokio::test]
    async fn refetch_with_unchanged_backend_is_idempotent() {
        let app = Router::new().route("/api/user", get(|| async { Json(envelope(user_json())) }));
        let store = store_against(app).await;

        store.fetch_user().await;
        let first = store.user().await;
        store.fetch_user().await;
        assert_eq!(store.user().await, first);
    }
}
