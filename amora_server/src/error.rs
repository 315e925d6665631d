use amora_core::error::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorServer {
    pub message: String,
    pub status: u16,
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<StoreError> for ErrorServer {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::NotFound(_) => 404,
            StoreError::DuplicateKey(_) => 409,
            StoreError::Validation(_) => 422,
            StoreError::Db(_) | StoreError::Serde(_) => {
                log::error!("store failure behind admin endpoint: {}", err);
                500
            }
        };
        ErrorServer {
            message: err.to_string(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_http_statuses() {
        let not_found: ErrorServer = StoreError::NotFound("u1".into()).into();
        assert_eq!(not_found.status, 404);

        let duplicate: ErrorServer = StoreError::DuplicateKey("u1".into()).into();
        assert_eq!(duplicate.status, 409);

        let invalid: ErrorServer = StoreError::Validation("already rejected".into()).into();
        assert_eq!(invalid.status, 422);
    }
}
