use axum::{Json, extract::State};
use holonet_types::models::{Character, Planet, User};

use crate::error::ApiError;
use crate::middleware::IdPath;
use crate::state::{AppState, run_blocking};

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let rows = run_blocking(&state, |db| db.list_users()).await?;
    collection(&state, rows, "users")
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<User>, ApiError> {
    run_blocking(&state, move |db| db.get_user(id))
        .await?
        .map(|row| Json(row.into()))
        .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))
}

/// GET /character
pub async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Character>>, ApiError> {
    let rows = run_blocking(&state, |db| db.list_characters()).await?;
    collection(&state, rows, "characters")
}

/// GET /character/{id}
pub async fn get_character(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Character>, ApiError> {
    run_blocking(&state, move |db| db.get_character(id))
        .await?
        .map(|row| Json(row.into()))
        .ok_or_else(|| ApiError::NotFound(format!("character {id} not found")))
}

/// GET /planet
pub async fn list_planets(State(state): State<AppState>) -> Result<Json<Vec<Planet>>, ApiError> {
    let rows = run_blocking(&state, |db| db.list_planets()).await?;
    collection(&state, rows, "planets")
}

/// GET /planet/{id}
pub async fn get_planet(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Planet>, ApiError> {
    run_blocking(&state, move |db| db.get_planet(id))
        .await?
        .map(|row| Json(row.into()))
        .ok_or_else(|| ApiError::NotFound(format!("planet {id} not found")))
}

fn collection<R, T>(state: &AppState, rows: Vec<R>, what: &str) -> Result<Json<Vec<T>>, ApiError>
where
    T: From<R>,
{
    if rows.is_empty() && !state.empty_list_ok {
        return Err(ApiError::EmptyCollection(format!("no {what} found")));
    }
    Ok(Json(rows.into_iter().map(T::from).collect()))
}
