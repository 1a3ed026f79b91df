use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use matchday_core::health::{healthz, readyz};
use matchday_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, logout, register},
    fixture::{create_fixture, get_fixture, remove_fixture, search_fixtures, update_fixture},
    team::{create_team, get_team, remove_team, search_teams, update_team},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        // Teams
        .route("/api/teams", post(create_team))
        .route("/api/teams", get(search_teams))
        .route("/api/teams/{id}", get(get_team))
        .route("/api/teams/{id}", patch(update_team))
        .route("/api/teams/{id}", delete(remove_team))
        // Fixtures
        .route("/api/fixtures", post(create_fixture))
        .route("/api/fixtures", get(search_fixtures))
        .route("/api/fixtures/{id}", get(get_fixture))
        .route("/api/fixtures/{id}", patch(update_fixture))
        .route("/api/fixtures/{id}", delete(remove_fixture))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
