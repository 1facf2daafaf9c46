use serde::{Deserialize, Serialize};

use crate::models::{CharacterFavorite, PlanetFavorite};

// -- Generic bodies --

/// Body of every error response: `{"msg": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub msg: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// -- Favorites --

/// GET /users/favorites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorite_characters: Vec<CharacterFavorite>,
    pub favorite_planets: Vec<PlanetFavorite>,
}

/// Either kind of favorite, serialized as the bare record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FavoriteRecord {
    Character(CharacterFavorite),
    Planet(PlanetFavorite),
}

/// POST /favorite/{kind}/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteAddedResponse {
    pub msg: String,
    /// False when the pair was already linked and nothing was inserted.
    pub created: bool,
    pub favorite: FavoriteRecord,
}
