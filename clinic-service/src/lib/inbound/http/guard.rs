use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::principal::models::Principal;
use crate::principal::ports::PrincipalServicePort;

/// The principal resolved from the request's bearer token.
///
/// Extracting this guards a route: the token is decoded and the principal
/// re-resolved from storage on every request, so a token issued for a
/// since-deleted account is rejected here. Role gates compose on top via
/// [`require_role`](crate::principal::service::require_role).
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let principal = state
            .principal_service
            .resolve_bearer(token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Bearer token rejected");
                ApiError::from(e)
            })?;

        Ok(CurrentPrincipal(principal))
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
