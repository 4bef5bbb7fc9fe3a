//! HTTP handlers for the toy listings API

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        JsonExtractionResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ListingResult;
use crate::models::{DeleteAck, InsertAck, ListingInput, ListingView, SellerQuery, UpdateAck};
use crate::repository::ListingRepository;
use crate::service::ListingService;

/// OpenAPI documentation for the toy listings API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_listing,
        list_listings,
        get_listing,
        replace_listing,
        delete_listing,
        listings_by_seller,
        listings_by_category,
        search_listings,
        seller_listings_by_price,
        most_stocked,
        best_sellers,
    ),
    components(
        schemas(ListingView, ListingInput, InsertAck, UpdateAck, DeleteAck),
        responses(
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            JsonExtractionResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Toys", description = "Toy listing endpoints")
    )
)]
pub struct ApiDoc;

/// Create the listings router with all HTTP endpoints
pub fn router<R: ListingRepository + 'static>(service: ListingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/all_toys", post(create_listing))
        .route("/alltoys", get(list_listings))
        .route("/alltoys/{category}", get(listings_by_category))
        .route(
            "/toy/{id}",
            get(get_listing).put(replace_listing).delete(delete_listing),
        )
        .route("/toys", get(listings_by_seller))
        .route("/toys/{select}", get(seller_listings_by_price))
        .route("/findtoy/{search}", get(search_listings))
        .route("/moststock", get(most_stocked))
        .route("/bestseller", get(best_sellers))
        .with_state(shared_service)
}

/// Create a listing
#[utoipa::path(
    post,
    path = "/all_toys",
    tag = "Toys",
    request_body = ListingInput,
    responses(
        (status = 200, description = "Listing inserted", body = InsertAck),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = JsonExtractionResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_listing<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    ValidatedJson(input): ValidatedJson<ListingInput>,
) -> ListingResult<Json<InsertAck>> {
    let ack = service.create_listing(input).await?;
    Ok(Json(ack))
}

/// List the first 20 listings
#[utoipa::path(
    get,
    path = "/alltoys",
    tag = "Toys",
    responses(
        (status = 200, description = "Up to 20 listings", body = Vec<ListingView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_listings<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
) -> ListingResult<Json<Vec<ListingView>>> {
    Ok(Json(service.list_listings().await?))
}

/// Get a listing by ID (`null` when missing)
#[utoipa::path(
    get,
    path = "/toy/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Listing ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Listing, or null when no listing has this id", body = Option<ListingView>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_listing<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ListingResult<Json<Option<ListingView>>> {
    Ok(Json(service.get_listing(id).await?))
}

/// Create or replace a listing by ID
#[utoipa::path(
    put,
    path = "/toy/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Listing ObjectId (24 hex characters)")
    ),
    request_body = ListingInput,
    responses(
        (status = 200, description = "Listing written", body = UpdateAck),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 422, response = JsonExtractionResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_listing<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<ListingInput>,
) -> ListingResult<Json<UpdateAck>> {
    Ok(Json(service.replace_listing(id, input).await?))
}

/// Delete a listing by ID
#[utoipa::path(
    delete,
    path = "/toy/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Listing ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Delete acknowledgment", body = DeleteAck),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_listing<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ListingResult<Json<DeleteAck>> {
    Ok(Json(service.delete_listing(id).await?))
}

/// List listings, optionally for one seller
#[utoipa::path(
    get,
    path = "/toys",
    tag = "Toys",
    params(SellerQuery),
    responses(
        (status = 200, description = "Listings", body = Vec<ListingView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn listings_by_seller<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Query(query): Query<SellerQuery>,
) -> ListingResult<Json<Vec<ListingView>>> {
    Ok(Json(service.listings_by_seller(query.email).await?))
}

/// List listings in a sub-category (`All` for every listing)
#[utoipa::path(
    get,
    path = "/alltoys/{category}",
    tag = "Toys",
    params(
        ("category" = String, Path, description = "Sub-category, or `All`")
    ),
    responses(
        (status = 200, description = "Listings", body = Vec<ListingView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn listings_by_category<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Path(category): Path<String>,
) -> ListingResult<Json<Vec<ListingView>>> {
    Ok(Json(service.listings_by_category(&category).await?))
}

/// Case-insensitive substring search on toy name
#[utoipa::path(
    get,
    path = "/findtoy/{search}",
    tag = "Toys",
    params(
        ("search" = String, Path, description = "Text to look for in the toy name")
    ),
    responses(
        (status = 200, description = "Matching listings", body = Vec<ListingView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_listings<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Path(search): Path<String>,
) -> ListingResult<Json<Vec<ListingView>>> {
    Ok(Json(service.search_listings(&search).await?))
}

/// A seller's listings sorted by price
#[utoipa::path(
    get,
    path = "/toys/{select}",
    tag = "Toys",
    params(
        ("select" = String, Path, description = "`Ascending`, `Descending`, or anything else for unsorted"),
        SellerQuery
    ),
    responses(
        (status = 200, description = "Seller listings", body = Vec<ListingView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seller_listings_by_price<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Path(select): Path<String>,
    Query(query): Query<SellerQuery>,
) -> ListingResult<Json<Vec<ListingView>>> {
    Ok(Json(
        service
            .seller_listings_by_price(&select, query.email)
            .await?,
    ))
}

/// Top 8 listings by quantity
#[utoipa::path(
    get,
    path = "/moststock",
    tag = "Toys",
    responses(
        (status = 200, description = "Most stocked listings", body = Vec<ListingView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn most_stocked<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
) -> ListingResult<Json<Vec<ListingView>>> {
    Ok(Json(service.most_stocked().await?))
}

/// Top 8 listings by ratings
#[utoipa::path(
    get,
    path = "/bestseller",
    tag = "Toys",
    responses(
        (status = 200, description = "Best rated listings", body = Vec<ListingView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn best_sellers<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
) -> ListingResult<Json<Vec<ListingView>>> {
    Ok(Json(service.best_sellers().await?))
}
