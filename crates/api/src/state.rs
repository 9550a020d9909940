use std::sync::Arc;

use orgdir_db::DbPool;

use crate::config::ServerConfig;

/// Handed to every handler through `State<AppState>`; clones share the pool.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    /// Read by the token extractor and the auth handlers.
    pub config: Arc<ServerConfig>,
}
