//! Handlers for favourite endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/{id}/favourites` | Optional `?resolve=true` embeds each asset |
//! | `POST`   | `/users/{id}/favourites` | Body: `{"asset_id":"..."}`; returns 201 |
//! | `GET`    | `/favourites/{id}` | 404 if not found |
//! | `DELETE` | `/favourites/{id}` | Returns 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use pinboard_core::{error::parse_id, favourite::Favourite};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, auth::Authenticated, error::ApiError, extract::JsonBody};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Join each favourite to the current state of its asset.
  #[serde(default)]
  pub resolve: bool,
}

/// `GET /users/{id}/favourites[?resolve=true]`
pub async fn list(
  State(state): State<AppState>,
  Authenticated(_): Authenticated,
  Path(user_id): Path<String>,
  Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
  let user_id = parse_id(&user_id)?;
  let favourites = &state.catalog.favourites;
  let body = if params.resolve {
    Json(favourites.list_resolved_favourites(user_id)?).into_response()
  } else {
    Json(favourites.list_favourites_by_user(user_id)?).into_response()
  };
  Ok(body)
}

#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub asset_id: Uuid,
}

/// `POST /users/{id}/favourites`
pub async fn add(
  State(state): State<AppState>,
  Authenticated(_): Authenticated,
  Path(user_id): Path<String>,
  JsonBody(body): JsonBody<AddBody>,
) -> Result<impl IntoResponse, ApiError> {
  let favourite = state
    .catalog
    .favourites
    .add_favourite(parse_id(&user_id)?, body.asset_id)?;
  Ok((StatusCode::CREATED, Json(favourite)))
}

/// `GET /favourites/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Authenticated(_): Authenticated,
  Path(id): Path<String>,
) -> Result<Json<Favourite>, ApiError> {
  let favourite = state.catalog.favourites.get_favourite(parse_id(&id)?)?;
  Ok(Json(favourite))
}

/// `DELETE /favourites/{id}`
pub async fn remove(
  State(state): State<AppState>,
  Authenticated(_): Authenticated,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  state.catalog.favourites.remove_favourite(parse_id(&id)?)?;
  Ok(StatusCode::NO_CONTENT)
}
