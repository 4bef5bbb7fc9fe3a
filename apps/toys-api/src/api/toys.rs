//! Toy listing routes, wiring the toys domain to MongoDB

use axum::Router;
use domain_toys::{ListingResult, ListingService, MongoListingRepository, handlers};

use crate::state::AppState;

fn repository(state: &AppState) -> MongoListingRepository {
    MongoListingRepository::with_collection(&state.db, &state.config.collection)
}

/// Create the listings router
pub fn router(state: &AppState) -> Router {
    handlers::router(ListingService::new(repository(state)))
}

/// Ensure the listing indexes exist before the server accepts requests
pub async fn init_indexes(state: &AppState) -> ListingResult<()> {
    repository(state).init_indexes().await
}
