//! Shared application state.
//!
//! Built once at startup and handed to the route builders; the MongoDB client
//! is closed from the shutdown cleanup.

use mongodb::{Client, Database};

#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares the underlying connection pool)
    pub mongo_client: Client,
    /// Database holding the listings collection
    pub db: Database,
}
