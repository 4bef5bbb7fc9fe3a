//! Toys Domain
//!
//! Toy-shop inventory listings stored in a single MongoDB collection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, choice of query shape
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │Models/Query │  ← Documents, DTOs, filters, aggregation pipelines
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_toys::{handlers, MongoListingRepository, ListingService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("ToysDB");
//!
//! let repository = MongoListingRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(ListingService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod numeric;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ListingError, ListingResult};
pub use handlers::ApiDoc;
pub use models::{DeleteAck, InsertAck, Listing, ListingInput, ListingView, UpdateAck};
pub use crate::mongodb::MongoListingRepository;
pub use query::{ListingFilter, RankedQuery, SortDirection, SortField};
pub use repository::ListingRepository;
pub use service::ListingService;
