use async_trait::async_trait;

use crate::types::{Dealer, Review};

/// Abstract document store for the two collections.
///
/// The HTTP layer and the seeder only ever see `Arc<dyn DealerStore>`, so a
/// live MongoDB deployment and the in-memory store are interchangeable.
#[async_trait]
pub trait DealerStore: Send + Sync {
  async fn all_reviews(&self) -> Result<Vec<Review>, anyhow::Error>;

  /// Reviews whose `dealership` field equals `dealer`. Empty when nothing
  /// matches, including ids no dealer record carries.
  async fn reviews_for_dealer(&self, dealer: i64) -> Result<Vec<Review>, anyhow::Error>;

  /// Persist a review and return it with its store-assigned identity.
  /// No deduplication: identical submissions create distinct documents.
  async fn insert_review(&self, review: Review) -> Result<Review, anyhow::Error>;

  async fn all_dealers(&self) -> Result<Vec<Dealer>, anyhow::Error>;

  /// Dealers whose `state` equals `state`, case-sensitive.
  async fn dealers_in_state(&self, state: &str) -> Result<Vec<Dealer>, anyhow::Error>;

  /// First dealer whose application-level `id` equals `id`. Duplicate ids in
  /// seed data make the result arbitrary among the matches.
  async fn dealer_by_id(&self, id: i64) -> Result<Option<Dealer>, anyhow::Error>;

  /// Drop every document in the reviews collection, then insert `reviews`.
  /// Returns the number of documents inserted.
  async fn replace_reviews(&self, reviews: Vec<Review>) -> Result<u64, anyhow::Error>;

  /// Drop every document in the dealers collection, then insert `dealers`.
  /// Returns the number of documents inserted.
  async fn replace_dealers(&self, dealers: Vec<Dealer>) -> Result<u64, anyhow::Error>;
}
