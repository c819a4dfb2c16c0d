use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A customer review of a dealership.
///
/// `dealership` refers to a [`Dealer::id`](crate::types::Dealer::id). The
/// reference is never validated: a review pointing at an unknown dealer is
/// stored and served as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
  /// Store-assigned identity. Absent until the document is persisted.
  #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
  pub id: Option<ObjectId>,
  pub name: Option<String>,
  pub dealership: Option<i64>,
  pub review: Option<String>,
  pub purchase: Option<bool>,
  pub purchase_date: Option<String>,
  pub car_make: Option<String>,
  pub car_model: Option<String>,
  pub car_year: Option<i32>,
  /// Fields carried by seed data that the API does not interpret.
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Request body accepted by the review insert route.
///
/// Only these eight fields are read from the body; anything else the client
/// sends is dropped. Absent fields are stored as nulls.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
  pub name: Option<String>,
  pub dealership: Option<i64>,
  pub review: Option<String>,
  pub purchase: Option<bool>,
  pub purchase_date: Option<String>,
  pub car_make: Option<String>,
  pub car_model: Option<String>,
  pub car_year: Option<i32>,
}

impl From<NewReview> for Review {
  fn from(body: NewReview) -> Self {
    Self {
      id: None,
      name: body.name,
      dealership: body.dealership,
      review: body.review,
      purchase: body.purchase,
      purchase_date: body.purchase_date,
      car_make: body.car_make,
      car_model: body.car_model,
      car_year: body.car_year,
      extra: serde_json::Map::new(),
    }
  }
}
