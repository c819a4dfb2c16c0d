use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use parking_lot::RwLock;

use super::backend::DealerStore;
use crate::types::{Dealer, Review};

/// In-process store backed by plain vectors.
///
/// Used by the test suite in place of a live deployment, and selectable as
/// the `memory` backend for development. Locks are never held across awaits.
#[derive(Default)]
pub struct MemoryStore {
  reviews: RwLock<Vec<Review>>,
  dealers: RwLock<Vec<Dealer>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl DealerStore for MemoryStore {
  async fn all_reviews(&self) -> Result<Vec<Review>, anyhow::Error> {
    Ok(self.reviews.read().clone())
  }

  async fn reviews_for_dealer(&self, dealer: i64) -> Result<Vec<Review>, anyhow::Error> {
    let matches = self
      .reviews
      .read()
      .iter()
      .filter(|r| r.dealership == Some(dealer))
      .cloned()
      .collect();
    Ok(matches)
  }

  async fn insert_review(&self, mut review: Review) -> Result<Review, anyhow::Error> {
    if review.id.is_none() {
      review.id = Some(ObjectId::new());
    }
    self.reviews.write().push(review.clone());
    Ok(review)
  }

  async fn all_dealers(&self) -> Result<Vec<Dealer>, anyhow::Error> {
    Ok(self.dealers.read().clone())
  }

  async fn dealers_in_state(&self, state: &str) -> Result<Vec<Dealer>, anyhow::Error> {
    let matches = self
      .dealers
      .read()
      .iter()
      .filter(|d| d.state == state)
      .cloned()
      .collect();
    Ok(matches)
  }

  async fn dealer_by_id(&self, id: i64) -> Result<Option<Dealer>, anyhow::Error> {
    Ok(self.dealers.read().iter().find(|d| d.id == id).cloned())
  }

  async fn replace_reviews(&self, mut reviews: Vec<Review>) -> Result<u64, anyhow::Error> {
    for review in &mut reviews {
      if review.id.is_none() {
        review.id = Some(ObjectId::new());
      }
    }
    let count = reviews.len() as u64;
    *self.reviews.write() = reviews;
    Ok(count)
  }

  async fn replace_dealers(&self, mut dealers: Vec<Dealer>) -> Result<u64, anyhow::Error> {
    for dealer in &mut dealers {
      if dealer.object_id.is_none() {
        dealer.object_id = Some(ObjectId::new());
      }
    }
    let count = dealers.len() as u64;
    *self.dealers.write() = dealers;
    Ok(count)
  }
}
