use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A dealership record.
///
/// Read-only through the HTTP API; the collection is replaced wholesale from
/// the seed file at startup. Lookups go through the application-level `id`,
/// never the store-assigned `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dealer {
  #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
  pub object_id: Option<ObjectId>,
  /// Application-level identifier. Uniqueness is not enforced; duplicate ids
  /// in seed data mean single-dealer lookups return the first match.
  pub id: i64,
  pub state: String,
  /// Descriptive attributes (name, address, ...) passed through untouched.
  #[serde(flatten)]
  pub attributes: serde_json::Map<String, serde_json::Value>,
}
