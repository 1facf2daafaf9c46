use std::sync::Arc;

use anyhow::anyhow;
use holonet_db::Database;
use tracing::error;

use crate::config::Config;
use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub acting_user_id: i64,
    pub empty_list_ok: bool,
}

impl AppStateInner {
    pub fn new(db: Database, config: &Config) -> AppState {
        Arc::new(Self {
            db,
            acting_user_id: config.acting_user_id,
            empty_list_ok: config.empty_list_ok,
        })
    }
}

/// Runs a blocking DB call off the async runtime.
pub(crate) async fn run_blocking<F, T, E>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow!("blocking task failed"))
        })?
        .map_err(Into::into)
}
