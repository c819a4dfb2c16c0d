mod config;
mod http;

pub use config::{
  BackendType, LoggingSection, MongoSection, SeedSection, ServerConfig, ServerSection,
};
pub use http::{router, ApiError, AppState, HttpServer};
