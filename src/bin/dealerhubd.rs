use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use dealerhub::db::{seed, DealerStore, MemoryStore, MongoStore};
use dealerhub::server::{BackendType, HttpServer, ServerConfig};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "dealerhubd", about = "DealerHub dealership review API", version)]
struct Args {
  #[arg(long, env = "DEALERHUB_MONGO_URL")]
  mongo_url: Option<String>,
  #[arg(long, env = "DEALERHUB_DATABASE")]
  database: Option<String>,
  /// Serve from the in-memory backend instead of MongoDB
  #[arg(long)]
  memory: bool,
  #[arg(short, long)]
  port: Option<u16>,
  #[arg(long)]
  host: Option<String>,
  #[arg(short, long)]
  config: Option<String>,
  /// Reviews seed file
  #[arg(long)]
  reviews: Option<String>,
  /// Dealerships seed file
  #[arg(long)]
  dealerships: Option<String>,
  #[arg(long)]
  log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
  let args = Args::parse();

  // Load config: explicit path > auto-detect > defaults
  let mut config = if let Some(path) = &args.config {
    ServerConfig::from_file(path)?
  } else {
    ServerConfig::find_and_load()?.unwrap_or_default()
  };

  // CLI args override config file
  if let Some(url) = args.mongo_url {
    config.mongo.url = url;
    config.backend = BackendType::Mongo;
  }
  if let Some(database) = args.database {
    config.mongo.database = database;
  }
  if args.memory {
    config.backend = BackendType::Memory;
  }
  if let Some(port) = args.port {
    config.server.port = port;
  }
  if let Some(host) = args.host {
    config.server.host = host;
  }
  if let Some(path) = args.reviews {
    config.seed.reviews = path;
  }
  if let Some(path) = args.dealerships {
    config.seed.dealerships = path;
  }
  if let Some(level) = args.log_level {
    config.logging.level = level;
  }

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let store: Arc<dyn DealerStore> = match config.backend {
    BackendType::Mongo => {
      tracing::info!("Using MongoDB at {}", config.mongo.url);
      Arc::new(MongoStore::connect(&config.mongo.url, &config.mongo.database).await?)
    }
    BackendType::Memory => {
      tracing::info!("Using in-memory backend");
      Arc::new(MemoryStore::new())
    }
  };

  // Seed before the listener binds so early requests never observe a
  // partially seeded collection. Seeding failures are logged, not fatal.
  seed::seed_all(
    store.as_ref(),
    Path::new(&config.seed.reviews),
    Path::new(&config.seed.dealerships),
  )
  .await;

  let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
  tokio::spawn(async move {
    shutdown_signal().await;
    let _ = shutdown_tx.send(());
  });

  HttpServer::new(config, store, shutdown_rx).run().await
}

async fn shutdown_signal() {
  let ctrl_c = async {
    tokio::signal::ctrl_c()
      .await
      .expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
      .expect("Failed to install SIGTERM handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => tracing::info!("Received SIGINT"),
    _ = terminate => tracing::info!("Received SIGTERM"),
  }
}
