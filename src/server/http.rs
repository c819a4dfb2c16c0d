use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use super::config::ServerConfig;
use crate::db::DealerStore;
use crate::types::{Dealer, NewReview, Review};

type Store = Arc<dyn DealerStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub store: Store,
}

/// Client-facing request errors. Responses carry a fixed generic message;
/// the underlying cause is logged server-side and never sent to the client.
pub enum ApiError {
  /// Store failure while listing reviews or dealers.
  FetchMany,
  /// Store failure while looking up a single dealer.
  FetchOne,
  /// Malformed body or store failure on review insert.
  Insert,
  /// No dealer document matches the requested id.
  DealerNotFound,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, msg) = match self {
      Self::FetchMany => (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching documents"),
      Self::FetchOne => (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching document"),
      Self::Insert => (StatusCode::INTERNAL_SERVER_ERROR, "Error inserting review"),
      Self::DealerNotFound => (StatusCode::NOT_FOUND, "Dealer not found"),
    };
    (status, Json(serde_json::json!({ "error": msg }))).into_response()
  }
}

/// Build the request router.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
  let cors = if cors_origins.is_empty() || cors_origins.iter().any(|o| o == "*") {
    CorsLayer::permissive()
  } else {
    let origins: Vec<_> = cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
      .allow_origin(origins)
      .allow_methods(Any)
      .allow_headers(Any)
  };

  Router::new()
    .route("/", get(welcome))
    .route("/fetchReviews", get(fetch_reviews))
    .route("/fetchReviews/dealer/{id}", get(fetch_reviews_for_dealer))
    .route("/fetchDealers", get(fetch_dealers))
    .route("/fetchDealers/{state}", get(fetch_dealers_by_state))
    .route("/fetchDealer/{id}", get(fetch_dealer))
    .route("/insert_review", post(insert_review))
    .layer(cors)
    .with_state(state)
}

async fn welcome() -> &'static str {
  "Welcome to the DealerHub API!"
}

async fn fetch_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
  let docs = state.store.all_reviews().await.map_err(|e| {
    tracing::debug!("review listing failed: {:#}", e);
    ApiError::FetchMany
  })?;
  Ok(Json(docs))
}

async fn fetch_reviews_for_dealer(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
  // A non-numeric id cannot match any dealership reference.
  let docs = match id.parse::<i64>() {
    Ok(dealer) => state.store.reviews_for_dealer(dealer).await.map_err(|e| {
      tracing::debug!("review listing for dealer {} failed: {:#}", dealer, e);
      ApiError::FetchMany
    })?,
    Err(_) => Vec::new(),
  };
  Ok(Json(docs))
}

async fn fetch_dealers(State(state): State<AppState>) -> Result<Json<Vec<Dealer>>, ApiError> {
  let docs = state.store.all_dealers().await.map_err(|e| {
    tracing::debug!("dealer listing failed: {:#}", e);
    ApiError::FetchMany
  })?;
  Ok(Json(docs))
}

async fn fetch_dealers_by_state(
  State(state): State<AppState>,
  Path(us_state): Path<String>,
) -> Result<Json<Vec<Dealer>>, ApiError> {
  let docs = state.store.dealers_in_state(&us_state).await.map_err(|e| {
    tracing::debug!("dealer listing for state {} failed: {:#}", us_state, e);
    ApiError::FetchMany
  })?;
  Ok(Json(docs))
}

async fn fetch_dealer(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<Json<Dealer>, ApiError> {
  let id: i64 = id.parse().map_err(|_| ApiError::DealerNotFound)?;
  let dealer = state.store.dealer_by_id(id).await.map_err(|e| {
    tracing::debug!("dealer lookup {} failed: {:#}", id, e);
    ApiError::FetchOne
  })?;
  match dealer {
    Some(d) => Ok(Json(d)),
    None => Err(ApiError::DealerNotFound),
  }
}

async fn insert_review(
  State(state): State<AppState>,
  body: Bytes,
) -> Result<Json<Review>, ApiError> {
  // The body is parsed by hand so that malformed input maps to the same
  // generic error as a store failure instead of an extractor rejection.
  let body: NewReview = serde_json::from_slice(&body).map_err(|e| {
    tracing::error!("rejected review body: {}", e);
    ApiError::Insert
  })?;
  let saved = state.store.insert_review(body.into()).await.map_err(|e| {
    tracing::error!("review insert failed: {:#}", e);
    ApiError::Insert
  })?;
  Ok(Json(saved))
}

/// HTTP server: binds after seeding has completed and drains on shutdown.
pub struct HttpServer {
  config: ServerConfig,
  store: Store,
  shutdown_rx: broadcast::Receiver<()>,
}

impl HttpServer {
  pub fn new(config: ServerConfig, store: Store, shutdown_rx: broadcast::Receiver<()>) -> Self {
    Self {
      config,
      store,
      shutdown_rx,
    }
  }

  pub async fn run(mut self) -> Result<(), anyhow::Error> {
    let state = AppState { store: self.store };
    let app = router(state, &self.config.server.cors_origins);

    let addr = self.config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("DealerHub API on http://{}", addr);

    axum::serve(listener, app.into_make_service())
      .with_graceful_shutdown(async move {
        let _ = self.shutdown_rx.recv().await;
        tracing::info!("HTTP server shutting down");
      })
      .await?;
    Ok(())
  }
}
