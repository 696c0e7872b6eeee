//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | Admin. All users, oldest first |
//! | `POST`   | `/users` | Admin. Body: `{"name":"...","email":"..."}`; returns 201 |
//! | `GET`    | `/users/{id}` | 404 if not found |
//! | `PUT`    | `/users/{id}` | Body: [`UserUpdate`] |
//! | `DELETE` | `/users/{id}` | Admin. Returns 204 |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pinboard_core::{
  auth::ADMIN_ROLE,
  error::parse_id,
  user::{NewUser, User, UserUpdate},
};

use crate::{AppState, auth::Authenticated, error::ApiError, extract::JsonBody};

/// `GET /users`
pub async fn list(
  State(state): State<AppState>,
  Authenticated(identity): Authenticated,
) -> Result<Json<Vec<User>>, ApiError> {
  identity.require_role(ADMIN_ROLE)?;
  Ok(Json(state.catalog.users.list_users()))
}

/// `POST /users`
pub async fn create(
  State(state): State<AppState>,
  Authenticated(identity): Authenticated,
  JsonBody(body): JsonBody<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
  identity.require_role(ADMIN_ROLE)?;
  let user = state.catalog.users.create_user(body)?;
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Authenticated(_): Authenticated,
  Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
  let user = state.catalog.users.get_user(parse_id(&id)?)?;
  Ok(Json(user))
}

/// `PUT /users/{id}`
pub async fn update(
  State(state): State<AppState>,
  Authenticated(_): Authenticated,
  Path(id): Path<String>,
  JsonBody(body): JsonBody<UserUpdate>,
) -> Result<Json<User>, ApiError> {
  let user = state.catalog.users.update_user(parse_id(&id)?, body)?;
  Ok(Json(user))
}

/// `DELETE /users/{id}`
pub async fn delete(
  State(state): State<AppState>,
  Authenticated(identity): Authenticated,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  identity.require_role(ADMIN_ROLE)?;
  state.catalog.users.delete_user(parse_id(&id)?)?;
  Ok(StatusCode::NO_CONTENT)
}
