use axum::{Extension, Json, extract::State};
use holonet_db::FavoriteKind;
use holonet_types::api::{FavoriteAddedResponse, FavoritesResponse, MessageResponse};

use crate::error::ApiError;
use crate::middleware::{ActingUser, IdPath};
use crate::state::{AppState, run_blocking};

/// GET /users/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = run_blocking(&state, move |db| db.list_favorites(user_id)).await?;

    Ok(Json(FavoritesResponse {
        favorite_characters: favorites
            .characters
            .into_iter()
            .map(|row| row.into_character())
            .collect(),
        favorite_planets: favorites
            .planets
            .into_iter()
            .map(|row| row.into_planet())
            .collect(),
    }))
}

/// POST /favorite/planet/{planet_id}
pub async fn add_planet_favorite(
    State(state): State<AppState>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
    IdPath(planet_id): IdPath,
) -> Result<Json<FavoriteAddedResponse>, ApiError> {
    add(&state, FavoriteKind::Planet, user_id, planet_id).await
}

/// POST /favorite/people/{people_id}
pub async fn add_character_favorite(
    State(state): State<AppState>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
    IdPath(character_id): IdPath,
) -> Result<Json<FavoriteAddedResponse>, ApiError> {
    add(&state, FavoriteKind::Character, user_id, character_id).await
}

/// DELETE /favorite/planet/{planet_id}
pub async fn remove_planet_favorite(
    State(state): State<AppState>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
    IdPath(planet_id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    remove(&state, FavoriteKind::Planet, user_id, planet_id).await
}

/// DELETE /favorite/people/{people_id}
pub async fn remove_character_favorite(
    State(state): State<AppState>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
    IdPath(character_id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    remove(&state, FavoriteKind::Character, user_id, character_id).await
}

async fn add(
    state: &AppState,
    kind: FavoriteKind,
    user_id: i64,
    entity_id: i64,
) -> Result<Json<FavoriteAddedResponse>, ApiError> {
    let added = run_blocking(state, move |db| db.add_favorite(kind, user_id, entity_id)).await?;

    let name = &added.favorite.entity_name;
    let msg = if added.created {
        format!("{kind} {name} added to favorites")
    } else {
        format!("{kind} {name} is already a favorite")
    };

    Ok(Json(FavoriteAddedResponse {
        msg,
        created: added.created,
        favorite: added.favorite.into_record(),
    }))
}

async fn remove(
    state: &AppState,
    kind: FavoriteKind,
    user_id: i64,
    entity_id: i64,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = run_blocking(state, move |db| db.remove_favorite(kind, user_id, entity_id)).await?;

    Ok(Json(MessageResponse {
        msg: format!("{kind} {} removed from favorites", removed.entity_name),
    }))
}
