//! JSON REST API for Pinboard.
//!
//! Exposes an axum [`Router`] backed by a [`Catalog`]. Every route requires a
//! bearer token, verified by the [`Authenticator`] in [`AppState`]; TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(pinboard_api::api_router(state))
//! ```

pub mod assets;
pub mod auth;
pub mod error;
pub mod extract;
pub mod favourites;
pub mod users;

use std::sync::Arc;

use axum::{Router, routing::get};
use pinboard_core::{Catalog, auth::Authenticator};

pub use auth::{StaticTokens, TokenGrant};
pub use error::ApiError;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState {
  pub catalog: Catalog,
  pub auth:    Arc<dyn Authenticator>,
}

impl AppState {
  pub fn new(catalog: Catalog, auth: impl Authenticator + 'static) -> Self {
    Self {
      catalog,
      auth: Arc::new(auth),
    }
  }
}

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router(state: AppState) -> Router<()> {
  Router::new()
    // Users
    .route("/users", get(users::list).post(users::create))
    .route(
      "/users/{id}",
      get(users::get_one).put(users::update).delete(users::delete),
    )
    // Favourites
    .route(
      "/users/{id}/favourites",
      get(favourites::list).post(favourites::add),
    )
    .route(
      "/favourites/{id}",
      get(favourites::get_one).delete(favourites::remove),
    )
    // Assets
    .route("/assets", get(assets::list).post(assets::create))
    .route(
      "/assets/{id}",
      get(assets::get_one).put(assets::update).delete(assets::delete),
    )
    .with_state(state)
}
