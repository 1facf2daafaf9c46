use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use holonet_db::FavoriteError;
use holonet_types::api::ErrorBody;
use thiserror::Error;
use tracing::{error, warn};

/// Failures a handler can answer with. Every variant renders as
/// `{"msg": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// A list endpoint found zero rows. Answered like `NotFound` unless
    /// empty lists are configured to succeed.
    #[error("{0}")]
    EmptyCollection(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::EmptyCollection(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FavoriteError> for ApiError {
    fn from(e: FavoriteError) -> Self {
        if e.is_not_found() {
            Self::NotFound(e.to_string())
        } else {
            Self::Internal(e.into())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match &self {
            Self::Internal(e) => {
                error!("{:#}", e);
                "internal server error".to_string()
            }
            other => {
                warn!("{} {}", status.as_u16(), other);
                other.to_string()
            }
        };

        (status, Json(ErrorBody::new(msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kinds_map_to_404() {
        let err = ApiError::from(FavoriteError::PlanetNotFound(424242));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "planet 424242 not found");
    }

    #[test]
    fn unavailable_store_maps_to_500() {
        let err = ApiError::from(FavoriteError::from(holonet_db::LockPoisoned));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_collection_is_404() {
        assert_eq!(
            ApiError::EmptyCollection("no users found".into()).status(),
            StatusCode::NOT_FOUND
        );
    }
}
