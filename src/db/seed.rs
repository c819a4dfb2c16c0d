//! Startup seeding: both collections are dropped and repopulated from JSON
//! fixture files before the server starts accepting requests.
//!
//! Seeding failures are logged and never fatal. A reviews failure does not
//! prevent dealership seeding; the server serves whatever data exists.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::backend::DealerStore;
use crate::types::{Dealer, Review};

#[derive(Debug, Error)]
pub enum SeedError {
  #[error("failed to read seed file {path}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },
  #[error("seed file {path} is not valid JSON")]
  Parse {
    path: String,
    #[source]
    source: serde_json::Error,
  },
  #[error("store rejected seed data")]
  Store(#[source] anyhow::Error),
}

#[derive(Deserialize)]
struct ReviewSeedFile {
  reviews: Vec<Review>,
}

#[derive(Deserialize)]
struct DealerSeedFile {
  dealerships: Vec<Dealer>,
}

fn read_seed_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SeedError> {
  let content = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
    path: path.display().to_string(),
    source,
  })?;
  serde_json::from_str(&content).map_err(|source| SeedError::Parse {
    path: path.display().to_string(),
    source,
  })
}

/// Replace the reviews collection with the contents of the fixture at `path`
/// (a JSON object with a top-level `reviews` array).
pub async fn seed_reviews(store: &dyn DealerStore, path: &Path) -> Result<u64, SeedError> {
  let file: ReviewSeedFile = read_seed_file(path)?;
  store
    .replace_reviews(file.reviews)
    .await
    .map_err(SeedError::Store)
}

/// Replace the dealers collection with the contents of the fixture at `path`
/// (a JSON object with a top-level `dealerships` array).
pub async fn seed_dealers(store: &dyn DealerStore, path: &Path) -> Result<u64, SeedError> {
  let file: DealerSeedFile = read_seed_file(path)?;
  store
    .replace_dealers(file.dealerships)
    .await
    .map_err(SeedError::Store)
}

/// Seed both collections, logging each outcome. Never fails: partial or
/// stale data is acceptable, the server starts regardless.
pub async fn seed_all(store: &dyn DealerStore, reviews_path: &Path, dealerships_path: &Path) {
  match seed_reviews(store, reviews_path).await {
    Ok(count) => tracing::info!("Seeded {} reviews from {}", count, reviews_path.display()),
    Err(e) => tracing::error!("Review seeding failed: {:#}", anyhow::Error::from(e)),
  }
  match seed_dealers(store, dealerships_path).await {
    Ok(count) => tracing::info!(
      "Seeded {} dealerships from {}",
      count,
      dealerships_path.display()
    ),
    Err(e) => tracing::error!("Dealership seeding failed: {:#}", anyhow::Error::from(e)),
  }
}
