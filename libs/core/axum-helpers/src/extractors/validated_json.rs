//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Body decoding failures reject with `JSON_EXTRACTION` (400 for malformed
/// syntax, 415 for a missing content type, 422 for a shape mismatch).
/// `Validate` failures reject with `400 VALIDATION_ERROR` and per-field details.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct NewToy {
///     #[validate(length(min = 1, max = 200))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<NewToy>) -> String {
///     payload.name
/// }
///
/// let app: Router = Router::new().route("/toys", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct NewToy {
        #[validate(length(min = 1, max = 200))]
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/toys",
            post(|ValidatedJson(toy): ValidatedJson<NewToy>| async move { toy.name }),
        )
    }

    async fn post_json(body: &'static str) -> StatusCode {
        app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/toys")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        assert_eq!(post_json(r#"{"name":"Robot"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_failed_validation_is_400() {
        assert_eq!(post_json(r#"{"name":""}"#).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_422() {
        assert_eq!(
            post_json(r#"{"name":5}"#).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_syntax_error_is_400() {
        assert_eq!(post_json(r#"{"name":"#).await, StatusCode::BAD_REQUEST);
    }
}
