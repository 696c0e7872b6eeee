//! Process wiring for the Pinboard server.
//!
//! Loads [`ServerConfig`], builds the single [`Catalog`] for the process, and
//! serves the JSON API next to an unauthenticated `/healthz` probe.

use std::path::Path;

use anyhow::Context as _;
use axum::{Router, routing::get};
use pinboard_api::{AppState, StaticTokens, TokenGrant};
use pinboard_core::{Catalog, CatalogConfig};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PINBOARD_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// Partitions per entity store.
  #[serde(default = "default_partitions")]
  pub partitions: usize,
  /// Bearer tokens accepted by the API.
  #[serde(default)]
  pub tokens:     Vec<TokenGrant>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_partitions() -> usize { CatalogConfig::default().partitions }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("PINBOARD")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Composition ──────────────────────────────────────────────────────────────

/// Build the stores, services, and authenticator described by `config`.
pub fn build_state(config: &ServerConfig) -> AppState {
  let catalog = Catalog::new(CatalogConfig {
    partitions: config.partitions,
  });
  let tokens = StaticTokens::new(config.tokens.iter().cloned());
  if tokens.is_empty() {
    tracing::warn!("no API tokens configured; every request will be rejected");
  }
  AppState::new(catalog, tokens)
}

/// The full HTTP application.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/healthz", get(|| async { "ok" }))
    .merge(pinboard_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use tower::ServiceExt as _;

  use super::*;

  fn config_from_toml(raw: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(raw, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn defaults_fill_missing_fields() {
    let cfg = config_from_toml("");
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert_eq!(cfg.partitions, 16);
    assert!(cfg.tokens.is_empty());
  }

  #[test]
  fn parses_tokens_and_partitions() {
    let cfg = config_from_toml(
      r#"
        port = 9000
        partitions = 4

        [[tokens]]
        token   = "abc"
        subject = "sub-1"
        roles   = ["admin"]
      "#,
    );
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.partitions, 4);
    assert_eq!(cfg.tokens.len(), 1);
    assert_eq!(cfg.tokens[0].roles, vec!["admin".to_string()]);
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/pinboard.toml")).unwrap();
    assert!(cfg.tokens.is_empty());
  }

  #[tokio::test]
  async fn healthz_needs_no_token() {
    let app = router(build_state(&config_from_toml("")));
    let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn api_routes_are_token_gated() {
    let state = build_state(&config_from_toml(
      r#"
        [[tokens]]
        token   = "abc"
        subject = "sub-1"
      "#,
    ));

    let req = Request::builder().uri("/assets").body(Body::empty()).unwrap();
    let resp = router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
      .uri("/assets")
      .header(header::AUTHORIZATION, "Bearer abc")
      .body(Body::empty())
      .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
