use mongodb::{
    bson::{Bson, Document, doc, oid::ObjectId},
    results::{DeleteResult, InsertOneResult, UpdateResult},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ListingError, ListingResult};
use crate::numeric;

/// A document from the `Toys` collection.
///
/// Only `_id` is interpreted; every other field is kept exactly as stored so
/// reads hand back whatever writers put there, legacy string numerics and
/// fields this service never names included.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: ObjectId,
    pub fields: Document,
}

impl Listing {
    /// Build a new listing from a validated payload.
    ///
    /// Absent listing fields are omitted. Extra payload fields are stored
    /// alongside them; a listing field of the same name wins.
    pub fn from_input(id: ObjectId, input: ListingInput) -> ListingResult<Self> {
        let mut fields: Document = input
            .listing_fields()
            .into_iter()
            .filter(|(_, value)| *value != Bson::Null)
            .map(|(key, value)| (key.to_string(), value))
            .collect();

        for (key, value) in extra_fields(input.extra)? {
            if key != "_id" && !fields.contains_key(&key) {
                fields.insert(key, value);
            }
        }

        Ok(Self { id, fields })
    }

    /// Split a stored document into its `_id` and the remaining fields.
    pub fn from_document(mut document: Document) -> ListingResult<Self> {
        match document.remove("_id") {
            Some(Bson::ObjectId(id)) => Ok(Self {
                id,
                fields: document,
            }),
            Some(other) => Err(ListingError::Decode(format!(
                "listing _id is not an ObjectId: {other}"
            ))),
            None => Err(ListingError::Decode("listing has no _id".to_string())),
        }
    }

    /// The full document to store, `_id` first
    pub fn into_document(self) -> Document {
        let mut document = doc! { "_id": self.id };
        document.extend(self.fields);
        document
    }

    /// A string field, `None` when missing, null or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get_str(key).ok()
    }
}

fn extra_fields(extra: Map<String, Value>) -> ListingResult<Document> {
    Document::try_from(extra).map_err(|e| {
        let mut error = ValidationError::new("extended_json");
        error.message = Some(e.to_string().into());

        let mut errors = ValidationErrors::new();
        errors.add("extra", error);
        ListingError::Validation(errors)
    })
}

/// Payload for creating or replacing a listing
///
/// `quantity`, `price` and `ratings` accept JSON numbers or numeric strings and
/// are stored as numbers. Fields not listed here are kept on create and
/// ignored on replace.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingInput {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Robot")]
    pub toy_name: String,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    #[validate(email)]
    #[schema(example = "seller@example.com")]
    pub seller_email: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub photo_url: Option<String>,
    #[serde(default)]
    #[schema(example = "Robots")]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "numeric::strict_i64")]
    #[validate(range(min = 0))]
    #[schema(example = 10)]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "numeric::strict_f64")]
    #[validate(range(min = 0.0))]
    #[schema(example = 25.0)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "numeric::strict_f64")]
    #[validate(range(min = 0.0, max = 5.0))]
    #[schema(example = 4.0)]
    pub ratings: Option<f64>,
    /// Any other fields of the payload
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListingInput {
    fn listing_fields(&self) -> [(&'static str, Bson); 9] {
        [
            ("sellerName", self.seller_name.clone().into()),
            ("sellerEmail", self.seller_email.clone().into()),
            ("toyName", self.toy_name.clone().into()),
            ("quantity", self.quantity.into()),
            ("photoUrl", self.photo_url.clone().into()),
            ("price", self.price.into()),
            ("subCategory", self.sub_category.clone().into()),
            ("ratings", self.ratings.into()),
            ("description", self.description.clone().into()),
        ]
    }

    /// `$set` body of a create-or-replace. All nine listing fields are
    /// written; absent ones become `null`.
    pub fn to_set_document(&self) -> Document {
        self.listing_fields()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

/// A stored listing as returned over HTTP: `_id` as a hex string, every other
/// field rendered as relaxed extended JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListingView {
    #[serde(rename = "_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    /// Stored fields (`toyName`, `price`, ...) as they are in the collection
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<Listing> for ListingView {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id.to_hex(),
            fields: listing
                .fields
                .into_iter()
                .map(|(key, value)| (key, value.into_relaxed_extjson()))
                .collect(),
        }
    }
}

/// Optional seller filter taken from `?email=`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SellerQuery {
    /// Seller email to filter by
    pub email: Option<String>,
}

/// Acknowledgment of a single insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<InsertOneResult> for InsertAck {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id_string(&result.inserted_id),
        }
    }
}

/// Acknowledgment of a create-or-replace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl From<UpdateResult> for UpdateAck {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result.upserted_id.as_ref().map(id_string);
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

/// Acknowledgment of a delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteAck {
    fn from(result: DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}

fn id_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn robot_input() -> ListingInput {
        serde_json::from_value(json!({
            "toyName": "Robot",
            "price": "25",
            "quantity": "10",
            "ratings": "4",
            "sellerEmail": "a@x.com",
            "subCategory": "Robots"
        }))
        .unwrap()
    }

    #[test]
    fn test_input_normalizes_numeric_strings() {
        let input = robot_input();
        assert_eq!(input.quantity, Some(10));
        assert_eq!(input.price, Some(25.0));
        assert_eq!(input.ratings, Some(4.0));
        assert!(input.extra.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_input_validation_rules() {
        let mut input = robot_input();
        input.seller_email = Some("not-an-email".to_string());
        assert!(input.validate().is_err());

        let mut input = robot_input();
        input.ratings = Some(7.0);
        assert!(input.validate().is_err());

        let mut input = robot_input();
        input.quantity = Some(-1);
        assert!(input.validate().is_err());

        let mut input = robot_input();
        input.toy_name = String::new();
        assert!(input.validate().is_err());

        let mut input = robot_input();
        input.photo_url = Some("no scheme".to_string());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_set_document_writes_all_nine_fields() {
        let input = ListingInput {
            toy_name: "Kite".to_string(),
            price: Some(3.5),
            extra: Map::from_iter([("color".to_string(), json!("red"))]),
            ..Default::default()
        };
        let set = input.to_set_document();

        assert_eq!(set.len(), 9);
        assert_eq!(set.get_str("toyName").unwrap(), "Kite");
        assert_eq!(set.get_f64("price").unwrap(), 3.5);
        assert_eq!(set.get("sellerEmail"), Some(&Bson::Null));
        assert_eq!(set.get("quantity"), Some(&Bson::Null));
        assert!(!set.contains_key("color"));
    }

    #[test]
    fn test_listing_stores_numbers_and_skips_absent_fields() {
        let id = ObjectId::new();
        let stored = Listing::from_input(id, robot_input())
            .unwrap()
            .into_document();

        assert_eq!(stored.keys().next().map(String::as_str), Some("_id"));
        assert_eq!(stored.get_object_id("_id").unwrap(), id);
        assert_eq!(stored.get_i64("quantity").unwrap(), 10);
        assert_eq!(stored.get_f64("price").unwrap(), 25.0);
        assert!(!stored.contains_key("sellerName"));
    }

    #[test]
    fn test_listing_keeps_extra_payload_fields() {
        let input: ListingInput = serde_json::from_value(json!({
            "toyName": "Robot",
            "sellerPhoto": "https://x/p.png",
            "tags": ["tin", "wind-up"],
            "_id": "ignored",
        }))
        .unwrap();
        assert_eq!(input.extra.len(), 3);

        let listing = Listing::from_input(ObjectId::new(), input).unwrap();
        assert_eq!(listing.get_str("sellerPhoto"), Some("https://x/p.png"));
        assert_eq!(
            listing.fields.get_array("tags").unwrap().len(),
            2
        );
        assert!(!listing.fields.contains_key("_id"));
    }

    #[test]
    fn test_listing_rejects_malformed_extended_json() {
        let input: ListingInput = serde_json::from_value(json!({
            "toyName": "Robot",
            "owner": { "$oid": 5 },
        }))
        .unwrap();

        let err = Listing::from_input(ObjectId::new(), input).unwrap_err();
        assert!(matches!(err, ListingError::Validation(_)));
    }

    #[test]
    fn test_from_document_requires_object_id() {
        let id = ObjectId::new();
        let listing = Listing::from_document(doc! { "_id": id, "toyName": "Kite" }).unwrap();
        assert_eq!(listing.id, id);
        assert!(!listing.fields.contains_key("_id"));

        let err = Listing::from_document(doc! { "_id": "kite-1" }).unwrap_err();
        assert!(matches!(err, ListingError::Decode(_)));
        assert!(Listing::from_document(doc! { "toyName": "Kite" }).is_err());
    }

    #[test]
    fn test_view_renders_hex_id() {
        let id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let view = ListingView::from(Listing::from_input(id, robot_input()).unwrap());
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["_id"], "507f1f77bcf86cd799439011");
        assert_eq!(value["toyName"], "Robot");
        assert_eq!(value["quantity"], 10);
        assert_eq!(value["price"], 25.0);
        assert!(value.get("sellerName").is_none());
    }

    #[test]
    fn test_view_passes_stored_document_through() {
        let id = ObjectId::new();
        let stored = doc! {
            "_id": id,
            "toyName": 42,
            "sellerPhoto": "https://x/p.png",
            "quantity": "lots",
            "price": "19.5",
            "description": Bson::Null,
        };

        let view = ListingView::from(Listing::from_document(stored).unwrap());
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["_id"], id.to_hex());
        assert_eq!(value["toyName"], 42);
        assert_eq!(value["sellerPhoto"], "https://x/p.png");
        assert_eq!(value["quantity"], "lots");
        assert_eq!(value["price"], "19.5");
        assert_eq!(value.get("description"), Some(&Value::Null));
    }

    #[test]
    fn test_update_ack_counts_upserts() {
        let id = ObjectId::new();
        let ack = UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id.to_hex()),
        };
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["upsertedCount"], 1);
        assert_eq!(value["upsertedId"], id.to_hex());
        assert_eq!(value["matchedCount"], 0);
    }
}
