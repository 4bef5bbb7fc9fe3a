//! MongoDB implementation of ListingRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Cursor, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::ListingResult;
use crate::models::{DeleteAck, InsertAck, Listing, ListingInput, UpdateAck};
use crate::query::{ListingFilter, RankedQuery};
use crate::repository::ListingRepository;

/// Collection used when none is configured
pub const DEFAULT_COLLECTION: &str = "Toys";

/// Name of the `toyName` index backing name search
pub const TOY_NAME_INDEX: &str = "toyNameTitle";

/// MongoDB implementation of the ListingRepository
///
/// Documents are read untyped so fields this service does not name, and
/// values of unexpected types, reach callers unchanged.
#[derive(Clone)]
pub struct MongoListingRepository {
    collection: Collection<Document>,
}

impl MongoListingRepository {
    /// Create a repository over the default `Toys` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a repository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }

    /// Ensure the `toyName` index exists. Idempotent.
    pub async fn init_indexes(&self) -> ListingResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "toyName": 1 })
            .options(
                IndexOptions::builder()
                    .name(TOY_NAME_INDEX.to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(index = TOY_NAME_INDEX, "Listing indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

async fn collect_listings(cursor: Cursor<Document>) -> ListingResult<Vec<Listing>> {
    let documents: Vec<Document> = cursor.try_collect().await?;
    documents.into_iter().map(Listing::from_document).collect()
}

#[async_trait]
impl ListingRepository for MongoListingRepository {
    #[instrument(skip(self, listing), fields(listing_id = %listing.id))]
    async fn insert(&self, listing: Listing) -> ListingResult<InsertAck> {
        let listing_id = listing.id;
        let result = self.collection.insert_one(listing.into_document()).await?;

        tracing::info!(listing_id = %listing_id, "Listing created");
        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: ListingFilter, limit: Option<i64>) -> ListingResult<Vec<Listing>> {
        let mut find = self.collection.find(filter.to_document());
        if let Some(limit) = limit {
            find = find.limit(limit);
        }

        collect_listings(find.await?).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> ListingResult<Option<Listing>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .map(Listing::from_document)
            .transpose()
    }

    #[instrument(skip(self, input))]
    async fn upsert(&self, id: ObjectId, input: ListingInput) -> ListingResult<UpdateAck> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": input.to_set_document() })
            .upsert(true)
            .await?;

        let ack = UpdateAck::from(result);
        tracing::info!(
            listing_id = %id,
            matched = ack.matched_count,
            upserted = ack.upserted_count,
            "Listing replaced"
        );
        Ok(ack)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ListingResult<DeleteAck> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        tracing::info!(listing_id = %id, deleted = result.deleted_count, "Listing deleted");
        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn ranked(&self, query: RankedQuery) -> ListingResult<Vec<Listing>> {
        let cursor = self.collection.aggregate(query.to_pipeline()).await?;
        collect_listings(cursor).await
    }
}
