use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ListingResult;
use crate::models::{DeleteAck, InsertAck, Listing, ListingInput, UpdateAck};
use crate::query::{ListingFilter, RankedQuery};

/// Repository trait for Listing persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert a new listing
    async fn insert(&self, listing: Listing) -> ListingResult<InsertAck>;

    /// Listings matching a filter in natural order, optionally bounded
    async fn find(&self, filter: ListingFilter, limit: Option<i64>) -> ListingResult<Vec<Listing>>;

    /// Get a listing by ID
    async fn find_by_id(&self, id: ObjectId) -> ListingResult<Option<Listing>>;

    /// Write all listing fields for `id`, creating the document if absent
    async fn upsert(&self, id: ObjectId, input: ListingInput) -> ListingResult<UpdateAck>;

    /// Delete a listing by ID
    async fn delete(&self, id: ObjectId) -> ListingResult<DeleteAck>;

    /// Run a ranked view pipeline
    async fn ranked(&self, query: RankedQuery) -> ListingResult<Vec<Listing>>;
}
