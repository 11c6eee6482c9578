pub mod dashboard;
pub mod nodes;
pub mod rank;
pub mod serve;
pub mod user;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;

use crate::client::ApiClient;
use crate::config::{self, Config};
use crate::domain::Stores;

/// Build the per-invocation store context from config, honoring a
/// `--base-url` override.
pub fn session(base_url: Option<&str>) -> Result<(Config, Stores)> {
    let config = config::load()?;
    let base = base_url.unwrap_or(&config.base_url);
    let api = Arc::new(ApiClient::new(base)?);
    let stores = Stores::new(api);
    Ok((config, stores))
}

pub fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}
