use crate::config::Config;
use axum::extract::FromRef;
use sqlx::PgPool;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}

// Substate extraction so handlers can take `State<PgPool>` directly
// instead of the whole state.
impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
