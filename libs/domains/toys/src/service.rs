//! Listing Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::ListingResult;
use crate::models::{DeleteAck, InsertAck, Listing, ListingInput, ListingView, UpdateAck};
use crate::query::{LIST_LIMIT, ListingFilter, RankedQuery, SortDirection};
use crate::repository::ListingRepository;

/// Listing service: validates payloads, picks the query shape for each view
/// and maps stored listings to their HTTP representation.
///
/// Payloads are validated here as well as in the `ValidatedJson` extractor so
/// callers that bypass the router get the same rules.
pub struct ListingService<R: ListingRepository> {
    repository: Arc<R>,
}

impl<R: ListingRepository> ListingService<R> {
    /// Create a new ListingService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new listing with a freshly generated id
    #[instrument(skip(self, input), fields(toy_name = %input.toy_name))]
    pub async fn create_listing(&self, input: ListingInput) -> ListingResult<InsertAck> {
        input.validate()?;

        let listing = Listing::from_input(ObjectId::new(), input)?;
        self.repository.insert(listing).await
    }

    /// First [`LIST_LIMIT`] listings in natural order
    #[instrument(skip(self))]
    pub async fn list_listings(&self) -> ListingResult<Vec<ListingView>> {
        let listings = self
            .repository
            .find(ListingFilter::All, Some(LIST_LIMIT))
            .await?;
        Ok(views(listings))
    }

    /// Get a listing by ID; `None` when it does not exist
    #[instrument(skip(self))]
    pub async fn get_listing(&self, id: ObjectId) -> ListingResult<Option<ListingView>> {
        Ok(self.repository.find_by_id(id).await?.map(ListingView::from))
    }

    /// Create-or-replace: every listing field is overwritten, absent ones with `null`
    #[instrument(skip(self, input))]
    pub async fn replace_listing(
        &self,
        id: ObjectId,
        input: ListingInput,
    ) -> ListingResult<UpdateAck> {
        input.validate()?;
        self.repository.upsert(id, input).await
    }

    /// Delete a listing; a missing id yields `deletedCount: 0`
    #[instrument(skip(self))]
    pub async fn delete_listing(&self, id: ObjectId) -> ListingResult<DeleteAck> {
        self.repository.delete(id).await
    }

    /// Listings of one seller, or every listing when the email is missing or empty
    #[instrument(skip(self))]
    pub async fn listings_by_seller(
        &self,
        email: Option<String>,
    ) -> ListingResult<Vec<ListingView>> {
        let filter = match email.filter(|email| !email.is_empty()) {
            Some(email) => ListingFilter::Seller(Some(email)),
            None => ListingFilter::All,
        };
        Ok(views(self.repository.find(filter, None).await?))
    }

    /// Listings in a sub-category; `"All"` returns every listing
    #[instrument(skip(self))]
    pub async fn listings_by_category(&self, category: &str) -> ListingResult<Vec<ListingView>> {
        let listings = self
            .repository
            .find(ListingFilter::category(category), None)
            .await?;
        Ok(views(listings))
    }

    /// Listings whose name contains `text`, ignoring case
    #[instrument(skip(self))]
    pub async fn search_listings(&self, text: &str) -> ListingResult<Vec<ListingView>> {
        let listings = self
            .repository
            .find(ListingFilter::NameContains(text.to_string()), None)
            .await?;
        Ok(views(listings))
    }

    /// A seller's listings sorted by price for `Ascending`/`Descending`,
    /// unsorted for any other `select`.
    ///
    /// Without an email only listings lacking a seller email match.
    #[instrument(skip(self))]
    pub async fn seller_listings_by_price(
        &self,
        select: &str,
        email: Option<String>,
    ) -> ListingResult<Vec<ListingView>> {
        let listings = match SortDirection::from_select(select) {
            Some(direction) => {
                self.repository
                    .ranked(RankedQuery::seller_by_price(email, direction))
                    .await?
            }
            None => {
                self.repository
                    .find(ListingFilter::Seller(email), None)
                    .await?
            }
        };
        Ok(views(listings))
    }

    /// Top listings by quantity, highest first
    #[instrument(skip(self))]
    pub async fn most_stocked(&self) -> ListingResult<Vec<ListingView>> {
        Ok(views(
            self.repository.ranked(RankedQuery::most_stocked()).await?,
        ))
    }

    /// Top listings by ratings, highest first
    #[instrument(skip(self))]
    pub async fn best_sellers(&self) -> ListingResult<Vec<ListingView>> {
        Ok(views(
            self.repository.ranked(RankedQuery::best_sellers()).await?,
        ))
    }
}

fn views(listings: Vec<Listing>) -> Vec<ListingView> {
    listings.into_iter().map(ListingView::from).collect()
}
