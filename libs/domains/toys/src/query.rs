//! Filter documents and aggregation pipelines for the listing views.

use mongodb::bson::{Bson, Document, doc};
use strum::{AsRefStr, EnumString};

/// Upper bound on `GET /alltoys`
pub const LIST_LIMIT: i64 = 20;

/// Upper bound on the top-stock and top-rated lists
pub const TOP_LIMIT: i64 = 8;

/// Category path segment that disables the category filter
pub const ALL_CATEGORIES: &str = "All";

/// Which listings a query selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingFilter {
    All,
    /// `sellerEmail` equality. `None` matches listings with no seller email.
    Seller(Option<String>),
    /// Exact `subCategory` match
    Category(String),
    /// Case-insensitive substring of `toyName`, matched literally
    NameContains(String),
}

impl ListingFilter {
    /// Category segment from the path, with `"All"` meaning no filter
    pub fn category(category: &str) -> Self {
        if category == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(category.to_string())
        }
    }

    pub fn to_document(&self) -> Document {
        match self {
            Self::All => doc! {},
            Self::Seller(Some(email)) => doc! { "sellerEmail": email },
            Self::Seller(None) => doc! { "sellerEmail": Bson::Null },
            Self::Category(category) => doc! { "subCategory": category },
            Self::NameContains(text) => doc! {
                "toyName": { "$regex": regex::escape(text), "$options": "i" }
            },
        }
    }
}

/// Numeric field a ranked view sorts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    Price,
    Quantity,
    Ratings,
}

impl SortField {
    /// Temporary field holding the coerced value during the pipeline
    pub fn converted_field(&self) -> &'static str {
        match self {
            Self::Price => "convertedPrice",
            Self::Quantity => "convertedQuantity",
            Self::Ratings => "convertedRatings",
        }
    }
}

/// Sort direction, parsed from the `/toys/{select}` segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `Ascending`/`Descending` select a sort; any other value means unsorted
    pub fn from_select(select: &str) -> Option<Self> {
        select.parse().ok()
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

/// Listings ordered by a numeric field that may hold legacy strings
#[derive(Debug, Clone, PartialEq)]
pub struct RankedQuery {
    pub filter: ListingFilter,
    pub field: SortField,
    pub direction: SortDirection,
    pub limit: Option<i64>,
}

impl RankedQuery {
    pub fn seller_by_price(email: Option<String>, direction: SortDirection) -> Self {
        Self {
            filter: ListingFilter::Seller(email),
            field: SortField::Price,
            direction,
            limit: None,
        }
    }

    pub fn most_stocked() -> Self {
        Self {
            filter: ListingFilter::All,
            field: SortField::Quantity,
            direction: SortDirection::Descending,
            limit: Some(TOP_LIMIT),
        }
    }

    pub fn best_sellers() -> Self {
        Self {
            filter: ListingFilter::All,
            field: SortField::Ratings,
            direction: SortDirection::Descending,
            limit: Some(TOP_LIMIT),
        }
    }

    /// `$match` (unless unfiltered), `$addFields` with `$convert` to double,
    /// `$sort` with `_id` as tiebreak, `$project` the temporary field away,
    /// then `$limit` when bounded.
    ///
    /// Values that cannot be converted become `null` and sort before every
    /// number ascending, after every number descending.
    pub fn to_pipeline(&self) -> Vec<Document> {
        let converted = self.field.converted_field();
        let source = format!("${}", self.field.as_ref());

        let mut added = Document::new();
        added.insert(
            converted,
            doc! {
                "$convert": {
                    "input": source,
                    "to": "double",
                    "onError": Bson::Null,
                    "onNull": Bson::Null,
                }
            },
        );
        let mut sort = Document::new();
        sort.insert(converted, self.direction.as_i32());
        sort.insert("_id", 1);
        let mut projection = Document::new();
        projection.insert(converted, 0);

        let mut pipeline = Vec::with_capacity(5);
        if self.filter != ListingFilter::All {
            pipeline.push(doc! { "$match": self.filter.to_document() });
        }
        pipeline.push(doc! { "$addFields": added });
        pipeline.push(doc! { "$sort": sort });
        pipeline.push(doc! { "$project": projection });
        if let Some(limit) = self.limit {
            pipeline.push(doc! { "$limit": limit });
        }
        pipeline
    }
}
