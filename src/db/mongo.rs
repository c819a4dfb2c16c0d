use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

use super::backend::DealerStore;
use crate::types::{Dealer, Review};

const REVIEWS_COLLECTION: &str = "reviews";
const DEALERS_COLLECTION: &str = "dealerships";

/// MongoDB-backed store.
///
/// The client connects lazily: constructing a `MongoStore` validates the
/// connection string but does not reach the deployment, so an unreachable
/// store surfaces per-operation rather than at startup.
pub struct MongoStore {
  reviews: Collection<Review>,
  dealers: Collection<Dealer>,
}

impl MongoStore {
  pub async fn connect(url: &str, database: &str) -> Result<Self, anyhow::Error> {
    let client = Client::with_uri_str(url).await?;
    let db = client.database(database);
    Ok(Self {
      reviews: db.collection(REVIEWS_COLLECTION),
      dealers: db.collection(DEALERS_COLLECTION),
    })
  }
}

#[async_trait]
impl DealerStore for MongoStore {
  async fn all_reviews(&self) -> Result<Vec<Review>, anyhow::Error> {
    let docs = self.reviews.find(doc! {}).await?.try_collect().await?;
    Ok(docs)
  }

  async fn reviews_for_dealer(&self, dealer: i64) -> Result<Vec<Review>, anyhow::Error> {
    let docs = self
      .reviews
      .find(doc! { "dealership": dealer })
      .await?
      .try_collect()
      .await?;
    Ok(docs)
  }

  async fn insert_review(&self, mut review: Review) -> Result<Review, anyhow::Error> {
    let result = self.reviews.insert_one(&review).await?;
    review.id = result.inserted_id.as_object_id();
    Ok(review)
  }

  async fn all_dealers(&self) -> Result<Vec<Dealer>, anyhow::Error> {
    let docs = self.dealers.find(doc! {}).await?.try_collect().await?;
    Ok(docs)
  }

  async fn dealers_in_state(&self, state: &str) -> Result<Vec<Dealer>, anyhow::Error> {
    let docs = self
      .dealers
      .find(doc! { "state": state })
      .await?
      .try_collect()
      .await?;
    Ok(docs)
  }

  async fn dealer_by_id(&self, id: i64) -> Result<Option<Dealer>, anyhow::Error> {
    let dealer = self.dealers.find_one(doc! { "id": id }).await?;
    Ok(dealer)
  }

  async fn replace_reviews(&self, reviews: Vec<Review>) -> Result<u64, anyhow::Error> {
    self.reviews.delete_many(doc! {}).await?;
    if reviews.is_empty() {
      return Ok(0);
    }
    let result = self.reviews.insert_many(&reviews).await?;
    Ok(result.inserted_ids.len() as u64)
  }

  async fn replace_dealers(&self, dealers: Vec<Dealer>) -> Result<u64, anyhow::Error> {
    self.dealers.delete_many(doc! {}).await?;
    if dealers.is_empty() {
      return Ok(0);
    }
    let result = self.dealers.insert_many(&dealers).await?;
    Ok(result.inserted_ids.len() as u64)
  }
}
