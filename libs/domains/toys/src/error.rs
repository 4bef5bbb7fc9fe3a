use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to decode listing: {0}")]
    Decode(String),
}

pub type ListingResult<T> = Result<T, ListingError>;

/// Convert ListingError to AppError for standardized error responses
impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Validation(errors) => AppError::ValidationError(errors),
            ListingError::Database(msg) => AppError::Database(msg),
            ListingError::Decode(msg) => AppError::DatabaseDecode(msg),
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ListingError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            mongodb::error::ErrorKind::BsonDeserialization(e) => ListingError::Decode(e.to_string()),
            _ => ListingError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use validator::Validate;

    #[derive(Validate)]
    struct Rated {
        #[validate(range(max = 5.0))]
        ratings: f64,
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let errors = Rated { ratings: 9.0 }.validate().unwrap_err();
        let response = ListingError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_maps_to_internal_error() {
        let response = ListingError::Database("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_decode_error_maps_to_internal_error() {
        let response = ListingError::Decode("bad _id".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
