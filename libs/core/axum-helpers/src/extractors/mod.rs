//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with the shared [`ErrorResponse`](crate::errors::ErrorResponse)
//! body instead of axum's plain-text rejections.

pub mod object_id_path;
pub mod validated_json;

pub use object_id_path::ObjectIdPath;
pub use validated_json::ValidatedJson;
