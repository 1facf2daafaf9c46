use thiserror::Error;

use crate::favorites::FavoriteKind;

#[derive(Debug, Error)]
#[error("database lock poisoned")]
pub struct LockPoisoned;

/// Failures of the favorites operations.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("user {0} not found")]
    UserNotFound(i64),

    #[error("character {0} not found")]
    CharacterNotFound(i64),

    #[error("planet {0} not found")]
    PlanetNotFound(i64),

    #[error("user {user_id} has no favorite {kind} {entity_id}")]
    FavoriteNotFound {
        kind: FavoriteKind,
        user_id: i64,
        entity_id: i64,
    },

    #[error(transparent)]
    Unavailable(#[from] LockPoisoned),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl FavoriteError {
    pub(crate) fn entity_not_found(kind: FavoriteKind, entity_id: i64) -> Self {
        match kind {
            FavoriteKind::Character => Self::CharacterNotFound(entity_id),
            FavoriteKind::Planet => Self::PlanetNotFound(entity_id),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CharacterNotFound(_)
                | Self::PlanetNotFound(_)
                | Self::FavoriteNotFound { .. }
        )
    }
}
