//! In-memory store contract tests - filters, identity assignment, replacement

use dealerhub::db::{DealerStore, MemoryStore};
use dealerhub::types::{Dealer, Review};
use serde_json::json;

fn review(dealer: i64, name: &str) -> Review {
  Review {
    id: None,
    name: Some(name.to_string()),
    dealership: Some(dealer),
    review: Some("Great service".to_string()),
    purchase: Some(true),
    purchase_date: Some("02/28/2024".to_string()),
    car_make: Some("Toyota".to_string()),
    car_model: Some("Camry".to_string()),
    car_year: Some(2023),
    extra: serde_json::Map::new(),
  }
}

fn dealer(id: i64, state: &str, city: &str) -> Dealer {
  let mut attributes = serde_json::Map::new();
  attributes.insert("city".to_string(), json!(city));
  Dealer {
    object_id: None,
    id,
    state: state.to_string(),
    attributes,
  }
}

// =============================================================================
// Reviews
// =============================================================================

#[tokio::test]
async fn test_insert_assigns_identity() {
  let store = MemoryStore::new();

  let saved = store.insert_review(review(1, "Alice")).await.unwrap();
  assert!(saved.id.is_some());
  assert_eq!(saved.name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_identical_inserts_create_distinct_documents() {
  let store = MemoryStore::new();

  let first = store.insert_review(review(1, "Alice")).await.unwrap();
  let second = store.insert_review(review(1, "Alice")).await.unwrap();

  assert_ne!(first.id, second.id);
  assert_eq!(store.all_reviews().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_reviews_for_dealer_filters_exactly() {
  let store = MemoryStore::new();
  store.insert_review(review(1, "Alice")).await.unwrap();
  store.insert_review(review(2, "Bob")).await.unwrap();
  store.insert_review(review(1, "Carol")).await.unwrap();

  let matches = store.reviews_for_dealer(1).await.unwrap();
  assert_eq!(matches.len(), 2);
  assert!(matches.iter().all(|r| r.dealership == Some(1)));
}

#[tokio::test]
async fn test_reviews_for_unknown_dealer_is_empty() {
  let store = MemoryStore::new();
  store.insert_review(review(1, "Alice")).await.unwrap();

  let matches = store.reviews_for_dealer(99).await.unwrap();
  assert!(matches.is_empty());
}

#[tokio::test]
async fn test_replace_reviews_clears_previous_contents() {
  let store = MemoryStore::new();
  store.insert_review(review(1, "Alice")).await.unwrap();
  store.insert_review(review(2, "Bob")).await.unwrap();

  let count = store
    .replace_reviews(vec![review(3, "Carol")])
    .await
    .unwrap();
  assert_eq!(count, 1);

  let all = store.all_reviews().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].name.as_deref(), Some("Carol"));
}

#[tokio::test]
async fn test_replace_reviews_assigns_identities() {
  let store = MemoryStore::new();
  store
    .replace_reviews(vec![review(1, "Alice"), review(2, "Bob")])
    .await
    .unwrap();

  let all = store.all_reviews().await.unwrap();
  assert!(all.iter().all(|r| r.id.is_some()));
}

// =============================================================================
// Dealers
// =============================================================================

#[tokio::test]
async fn test_dealers_in_state_is_case_sensitive() {
  let store = MemoryStore::new();
  store
    .replace_dealers(vec![
      dealer(1, "Texas", "El Paso"),
      dealer(2, "Texas", "Austin"),
      dealer(3, "Kansas", "Topeka"),
    ])
    .await
    .unwrap();

  assert_eq!(store.dealers_in_state("Texas").await.unwrap().len(), 2);
  assert_eq!(store.dealers_in_state("texas").await.unwrap().len(), 0);
  assert_eq!(store.dealers_in_state("Kansas").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_dealer_by_id_returns_first_of_duplicates() {
  let store = MemoryStore::new();
  store
    .replace_dealers(vec![
      dealer(7, "Texas", "El Paso"),
      dealer(7, "Kansas", "Topeka"),
    ])
    .await
    .unwrap();

  let found = store.dealer_by_id(7).await.unwrap().unwrap();
  assert_eq!(found.state, "Texas");
}

#[tokio::test]
async fn test_dealer_by_id_missing_is_none() {
  let store = MemoryStore::new();
  store
    .replace_dealers(vec![dealer(1, "Texas", "El Paso")])
    .await
    .unwrap();

  assert!(store.dealer_by_id(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_replace_dealers_assigns_store_identities() {
  let store = MemoryStore::new();
  let count = store
    .replace_dealers(vec![dealer(1, "Texas", "El Paso")])
    .await
    .unwrap();
  assert_eq!(count, 1);

  let all = store.all_dealers().await.unwrap();
  assert!(all[0].object_id.is_some());
  assert_eq!(all[0].attributes["city"], "El Paso");
}

#[tokio::test]
async fn test_empty_store_lists_are_empty() {
  let store = MemoryStore::new();
  assert!(store.all_reviews().await.unwrap().is_empty());
  assert!(store.all_dealers().await.unwrap().is_empty());
}
