use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use gazette_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// Claims for the detail route, where authentication is optional.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Claims>);

fn claims_from_headers(headers: &HeaderMap, secret: &str) -> Option<Claims> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Extract and validate the bearer token on mutation routes. An anonymous
/// or invalid request is redirected to the login endpoint instead of
/// surfacing a 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims =
        claims_from_headers(req.headers(), &state.jwt_secret).ok_or(ApiError::LoginRequired)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Attach claims when a valid token is present, without requiring one.
pub async fn optional_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let claims = claims_from_headers(req.headers(), &state.jwt_secret);
    req.extensions_mut().insert(MaybeUser(claims));
    next.run(req).await
}
