//! Authentication extractor.
//!
//! Routes that need a user identity take an [`Identity`] argument; the
//! extractor resolves the request's bearer token through the identity
//! provider. Role checks do NOT happen here — admin capability is checked
//! at the order directory boundary so that every mutation path goes through
//! one explicit authorization decision.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Extractor for the authenticated user of the current request.
///
/// Rejects with 401 when the token is missing or unknown.
///
/// # Example
///
/// ```rust,ignore
/// async fn my_orders(State(state): State<AppState>, Identity(user): Identity) { ... }
/// ```
pub struct Identity(pub CurrentUser);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthenticated)?;

        let user = state
            .identity()
            .current_user(token)
            .await
            .ok_or(AppError::Unauthenticated)?;

        Ok(Self(user))
    }
}

/// Pull the bearer token out of the Authorization header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/orders");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(
            bearer_token(&parts_with_auth(Some("Bearer tok-123"))),
            Some("tok-123")
        );
        assert_eq!(bearer_token(&parts_with_auth(Some("Basic xyz"))), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with_auth(None)), None);
    }
}
