//! Handlers for `/assets` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assets` | Optional `?type=chart\|insight\|audience` |
//! | `POST`   | `/assets` | Admin. Body: [`CreateAssetBody`]; returns 201 |
//! | `GET`    | `/assets/{id}` | 404 if not found |
//! | `PUT`    | `/assets/{id}` | Admin. Body: [`UpdateAssetBody`] |
//! | `DELETE` | `/assets/{id}` | Admin. Returns 204 |
//!
//! Request bodies are flat JSON objects: a `type` tag, an optional
//! `description`, and the variant's own fields next to them. The tag is
//! checked before the fields are decoded.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pinboard_core::{
  asset::{Asset, AssetBody, AssetChanges, AssetKind, AssetUpdate, NewAsset},
  auth::ADMIN_ROLE,
  error::parse_id,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{AppState, auth::Authenticated, error::ApiError, extract::JsonBody};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(rename = "type")]
  pub kind: Option<String>,
}

/// `GET /assets[?type=<kind>]`
pub async fn list(
  State(state): State<AppState>,
  Authenticated(_): Authenticated,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Asset>>, ApiError> {
  let kind = params.kind.as_deref().map(AssetKind::parse).transpose()?;
  Ok(Json(state.catalog.assets.list_assets(kind)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /assets`.
#[derive(Debug, Deserialize)]
pub struct CreateAssetBody {
  #[serde(rename = "type")]
  pub kind:        String,
  #[serde(default)]
  pub description: String,
  #[serde(flatten)]
  pub fields:      Map<String, Value>,
}

impl TryFrom<CreateAssetBody> for NewAsset {
  type Error = pinboard_core::Error;

  fn try_from(b: CreateAssetBody) -> Result<Self, Self::Error> {
    let body = AssetBody::from_parts(&b.kind, Value::Object(b.fields))?;
    Ok(NewAsset::new(b.description, body))
  }
}

/// `POST /assets`
pub async fn create(
  State(state): State<AppState>,
  Authenticated(identity): Authenticated,
  JsonBody(body): JsonBody<CreateAssetBody>,
) -> Result<impl IntoResponse, ApiError> {
  identity.require_role(ADMIN_ROLE)?;
  let asset = state.catalog.assets.create_asset(body.try_into()?)?;
  Ok((StatusCode::CREATED, Json(asset)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /assets/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Authenticated(_): Authenticated,
  Path(id): Path<String>,
) -> Result<Json<Asset>, ApiError> {
  let asset = state.catalog.assets.get_asset(parse_id(&id)?)?;
  Ok(Json(asset))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /assets/{id}`.
///
/// `type` may be omitted, in which case variant fields are read as changes
/// to the asset's current variant.
#[derive(Debug, Deserialize)]
pub struct UpdateAssetBody {
  #[serde(rename = "type")]
  pub kind:        Option<String>,
  pub description: Option<String>,
  #[serde(flatten)]
  pub fields:      Map<String, Value>,
}

/// `PUT /assets/{id}`
pub async fn update(
  State(state): State<AppState>,
  Authenticated(identity): Authenticated,
  Path(id): Path<String>,
  JsonBody(body): JsonBody<UpdateAssetBody>,
) -> Result<Json<Asset>, ApiError> {
  identity.require_role(ADMIN_ROLE)?;
  let id = parse_id(&id)?;
  let assets = &state.catalog.assets;

  let tag = match body.kind {
    Some(tag) => Some(tag),
    None if body.fields.is_empty() => None,
    None => Some(assets.get_asset(id)?.kind().to_string()),
  };
  let changes = tag
    .map(|tag| AssetChanges::from_parts(&tag, Value::Object(body.fields)))
    .transpose()?;

  let asset = assets.update_asset(id, AssetUpdate {
    description: body.description,
    changes,
  })?;
  Ok(Json(asset))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /assets/{id}`
pub async fn delete(
  State(state): State<AppState>,
  Authenticated(identity): Authenticated,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  identity.require_role(ADMIN_ROLE)?;
  state.catalog.assets.delete_asset(parse_id(&id)?)?;
  Ok(StatusCode::NO_CONTENT)
}
