use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use holonet_types::api::HealthResponse;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::catalog;
use crate::favorites;
use crate::middleware::resolve_acting_user;
use crate::state::AppState;

/// All routes with their state attached.
pub fn router(state: AppState) -> Router {
    let catalog_routes = Router::<AppState>::new()
        .route("/users", get(catalog::list_users))
        .route("/users/{id}", get(catalog::get_user))
        .route("/character", get(catalog::list_characters))
        .route("/character/{id}", get(catalog::get_character))
        .route("/planet", get(catalog::list_planets))
        .route("/planet/{id}", get(catalog::get_planet));

    let favorite_routes = Router::<AppState>::new()
        .route("/users/favorites", get(favorites::list_favorites))
        .route(
            "/favorite/planet/{planet_id}",
            post(favorites::add_planet_favorite).delete(favorites::remove_planet_favorite),
        )
        .route(
            "/favorite/people/{people_id}",
            post(favorites::add_character_favorite).delete(favorites::remove_character_favorite),
        )
        .layer(middleware::from_fn_with_state(state.clone(), resolve_acting_user));

    Router::new()
        .merge(catalog_routes)
        .merge(favorite_routes)
        .route("/health", get(health))
        .with_state(state)
}

/// The servable application: routes plus CORS, request tracing and
/// trailing-slash normalization (`/users/` is `/users`).
pub fn app(state: AppState) -> NormalizePath<Router> {
    let router = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}
