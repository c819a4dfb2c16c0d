use serde::{Deserialize, Serialize};
use std::path::Path;

/// Expand `${VAR}` and `$VAR` references against the process environment.
/// Unset variables expand to the empty string.
fn expand_env_vars(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut rest = input;

  while let Some(pos) = rest.find('$') {
    out.push_str(&rest[..pos]);
    rest = &rest[pos + 1..];

    let (name, consumed) = if let Some(stripped) = rest.strip_prefix('{') {
      match stripped.find('}') {
        Some(end) => (&stripped[..end], end + 2),
        None => {
          out.push('$');
          continue;
        }
      }
    } else {
      let len = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .count();
      (&rest[..len], len)
    };

    if name.is_empty() {
      out.push('$');
      continue;
    }
    out.push_str(&std::env::var(name).unwrap_or_default());
    rest = &rest[consumed..];
  }

  out.push_str(rest);
  out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
  #[default]
  Mongo,
  Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub backend: BackendType,
  #[serde(default)]
  pub mongo: MongoSection,
  #[serde(default)]
  pub seed: SeedSection,
  #[serde(default)]
  pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  /// CORS allowed origins. `["*"]` (the default) is fully permissive;
  /// anything else is an explicit origin list.
  #[serde(default = "default_cors_origins")]
  pub cors_origins: Vec<String>,
}

fn default_host() -> String {
  "0.0.0.0".into()
}
fn default_port() -> u16 {
  3030
}
fn default_cors_origins() -> Vec<String> {
  vec!["*".to_string()]
}

impl Default for ServerSection {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
      cors_origins: default_cors_origins(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoSection {
  #[serde(default = "default_mongo_url")]
  pub url: String,
  #[serde(default = "default_mongo_database")]
  pub database: String,
}

fn default_mongo_url() -> String {
  "mongodb://localhost:27017".into()
}
fn default_mongo_database() -> String {
  "dealershipsDB".into()
}

impl Default for MongoSection {
  fn default() -> Self {
    Self {
      url: default_mongo_url(),
      database: default_mongo_database(),
    }
  }
}

/// Paths of the JSON fixture files loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSection {
  #[serde(default = "default_reviews_path")]
  pub reviews: String,
  #[serde(default = "default_dealerships_path")]
  pub dealerships: String,
}

fn default_reviews_path() -> String {
  "data/reviews.json".into()
}
fn default_dealerships_path() -> String {
  "data/dealerships.json".into()
}

impl Default for SeedSection {
  fn default() -> Self {
    Self {
      reviews: default_reviews_path(),
      dealerships: default_dealerships_path(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
  #[serde(default = "default_level")]
  pub level: String,
}

fn default_level() -> String {
  "info".into()
}

impl Default for LoggingSection {
  fn default() -> Self {
    Self {
      level: default_level(),
    }
  }
}

impl ServerConfig {
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
    let content = std::fs::read_to_string(&path)?;
    let expanded = expand_env_vars(&content);
    Ok(serde_yaml::from_str(&expanded)?)
  }

  pub fn find_and_load() -> Result<Option<Self>, anyhow::Error> {
    for p in ["dealerhub.yaml", "dealerhub.yml"] {
      if Path::new(p).exists() {
        tracing::info!("Loading config from {}", p);
        return Ok(Some(Self::from_file(p)?));
      }
    }
    Ok(None)
  }

  pub fn address(&self) -> String {
    format!("{}:{}", self.server.host, self.server.port)
  }
}
