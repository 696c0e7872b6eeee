//! Domain types and services for the Pinboard favourites store.
//!
//! Three independent collections (users, assets, favourites) each live in
//! their own [`pinboard_store::ShardedStore`]. The services in [`service`]
//! own identifier assignment, validation, and the cross-collection checks a
//! favourite must pass before it is recorded. [`Catalog`] wires them
//! together once per process.
//!
//! This crate is free of HTTP dependencies; `pinboard-api` layers a router
//! on top of it.

pub mod asset;
pub mod auth;
pub mod catalog;
pub mod entity;
pub mod error;
pub mod favourite;
pub mod service;
pub mod user;

pub use catalog::{Catalog, CatalogConfig};
pub use entity::Entity;
pub use error::{Error, ErrorKind, Result};
