//! Bearer-token extractor and a config-driven token authenticator.

use std::collections::HashMap;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use pinboard_core::auth::{AuthError, Authenticator, Identity};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── Static tokens ───────────────────────────────────────────────────────────

/// One accepted token and the identity it stands for.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
  pub token:    String,
  pub subject:  String,
  pub username: Option<String>,
  pub email:    Option<String>,
  #[serde(default)]
  pub roles:    Vec<String>,
}

/// An [`Authenticator`] that accepts a fixed set of opaque tokens.
///
/// Stands in for an external identity provider in development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTokens {
  grants: HashMap<String, Identity>,
}

impl StaticTokens {
  pub fn new(grants: impl IntoIterator<Item = TokenGrant>) -> Self {
    let grants = grants
      .into_iter()
      .map(|g| {
        let identity = Identity {
          subject:  g.subject,
          username: g.username,
          email:    g.email,
          roles:    g.roles.into_iter().collect(),
        };
        (g.token, identity)
      })
      .collect();
    Self { grants }
  }

  pub fn len(&self) -> usize { self.grants.len() }

  pub fn is_empty(&self) -> bool { self.grants.is_empty() }
}

impl Authenticator for StaticTokens {
  fn verify(&self, token: &str) -> Result<Identity, AuthError> {
    self.grants.get(token).cloned().ok_or(AuthError::InvalidToken)
  }
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The verified caller of a request.
pub struct Authenticated(pub Identity);

/// Pull the bearer token out of `headers` and verify it.
pub fn verify_bearer(
  headers: &HeaderMap,
  auth: &dyn Authenticator,
) -> Result<Identity, AuthError> {
  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or(AuthError::MissingToken)?;
  auth.verify(token)
}

impl FromRequestParts<AppState> for Authenticated {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState,
  ) -> Result<Self, Self::Rejection> {
    let identity = verify_bearer(&parts.headers, state.auth.as_ref())
      .inspect_err(|e| tracing::debug!(error = %e, "rejected request"))?;
    Ok(Authenticated(identity))
  }
}

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;

  use super::*;

  fn tokens() -> StaticTokens {
    StaticTokens::new([TokenGrant {
      token:    "t-admin".into(),
      subject:  "sub-admin".into(),
      username: Some("root".into()),
      email:    None,
      roles:    vec!["admin".into()],
    }])
  }

  fn headers(value: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    h
  }

  #[test]
  fn accepts_known_token() {
    let identity = verify_bearer(&headers("Bearer t-admin"), &tokens()).unwrap();
    assert_eq!(identity.subject, "sub-admin");
    assert!(identity.has_role("admin"));
  }

  #[test]
  fn rejects_unknown_token() {
    assert!(matches!(
      verify_bearer(&headers("Bearer nope"), &tokens()),
      Err(AuthError::InvalidToken)
    ));
  }

  #[test]
  fn rejects_missing_or_non_bearer_header() {
    assert!(matches!(
      verify_bearer(&HeaderMap::new(), &tokens()),
      Err(AuthError::MissingToken)
    ));
    assert!(matches!(
      verify_bearer(&headers("Basic dXNlcjpwYXNz"), &tokens()),
      Err(AuthError::MissingToken)
    ));
    assert!(matches!(
      verify_bearer(&headers("Bearer   "), &tokens()),
      Err(AuthError::MissingToken)
    ));
  }
}
