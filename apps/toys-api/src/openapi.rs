//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::health;

/// Service-level documentation: info block and the service's own endpoints
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toy Shop API",
        version = "0.1.0",
        description = "REST API for toy shop listings backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(health::root, health::readiness),
    tags(
        (name = "Health", description = "Liveness and readiness checks")
    )
)]
struct ServiceDoc;

/// Combined documentation for every route the service exposes.
///
/// Listing routes live at the root, so the domain document is merged rather
/// than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_toys::ApiDoc::openapi());
        doc
    }
}
