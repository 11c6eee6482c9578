pub mod dashboard_store;
pub mod node;
pub mod node_store;
pub mod types;
pub mod user_store;

use std::sync::Arc;

use crate::client::ApiClient;

use self::dashboard_store::DashboardStore;
use self::node_store::NodeStore;
use self::user_store::UserStore;

/// All client-session state, constructed once at startup and handed to
/// views. Each store's state is private behind its own lock; stores never
/// reach into each other.
pub struct Stores {
    pub user: UserStore,
    pub node: NodeStore,
    pub dashboard: DashboardStore,
}

impl Stores {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            user: UserStore::new(api.clone()),
            node: NodeStore::new(api.clone()),
            dashboard: DashboardStore::new(api),
        }
    }
}
