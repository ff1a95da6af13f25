//! API-key authentication for the catalog routes.

use crate::config::AuthConfig;
use crate::server::error::ApiError;
use crate::server::AppContext;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};

/// Check a bearer token against the configured key.
fn check_auth(auth_config: &AuthConfig, bearer_token: Option<&str>) -> Result<(), ApiError> {
    if !auth_config.enabled {
        return Ok(());
    }

    match (bearer_token, auth_config.api_key.as_deref()) {
        (Some(token), Some(api_key)) if token == api_key => Ok(()),
        _ => Err(ApiError::unauthorized()),
    }
}

/// Middleware for API key authentication
pub async fn api_auth_middleware(
    State(ctx): State<AppContext>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer_token = bearer.map(|b| b.token().to_string());

    if let Err(e) = check_auth(&ctx.config.server.auth, bearer_token.as_deref()) {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
        return Err(e);
    }

    Ok(next.run(request).await)
}

/// Generate a random API key
pub fn generate_api_key() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}
