//! Request body extractor whose rejections render as [`ApiError`].

use axum::extract::FromRequest;

use crate::error::ApiError;

/// [`axum::Json`] with malformed or incomplete bodies reported as a 400
/// `{"error": ...}` response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
