use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::token::ports::TokenVerifier;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Access gate: admits a request only with a verified token.
///
/// On success the decoded `auth::Claims` are stored in request extensions.
/// On any failure the request is answered with 401 and the handler never runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.token_verifier.verify(&token).await.map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// The header carries the raw token; a `Bearer ` prefix is tolerated.
fn extract_token_from_header(req: &Request) -> Result<String, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            ApiError::Unauthorized
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::debug!("Authorization header is not visible ASCII");
        ApiError::Unauthorized
    })?;

    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    if token.is_empty() {
        return Err(ApiError::Unauthorized);
    }

    Ok(token.to_string())
}
