pub mod sessions;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use ssc_backend::{ProvisioningClient, SessionClient};
use ssc_core::Grammar;

use crate::state::AppState;

pub fn create_router<P, S>(state: AppState<P, S>) -> Router
where
    P: ProvisioningClient + 'static,
    S: SessionClient + 'static,
{
    Router::new()
        // Session lookup and deletion
        .route("/ssc", post(sessions::lookup::<P, S>))
        .route("/ssc/", post(sessions::lookup::<P, S>))
        .route("/ssc/delete", post(sessions::delete::<P, S>))
        // Form metadata
        .route("/ssc/options", get(options::<P, S>))
        // Health check
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /ssc/options - Cities, node kinds and field ranges for the form selectors.
async fn options<P, S>(State(state): State<AppState<P, S>>) -> Json<Grammar>
where
    P: ProvisioningClient + 'static,
    S: SessionClient + 'static,
{
    Json(state.grammar.as_ref().clone())
}

async fn health() -> &'static str {
    "OK"
}
