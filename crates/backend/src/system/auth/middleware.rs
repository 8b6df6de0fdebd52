use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Raw bearer token of the current request
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

/// Middleware that requires a valid, non-revoked session token
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let claims = super::jwt::validate_token(&token).map_err(|_| StatusCode::UNAUTHORIZED)?;

    if super::sessions::is_revoked(&token) {
        tracing::debug!("Rejected revoked session of {}", claims.username);
        return Err(StatusCode::UNAUTHORIZED);
    }

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(AuthToken(token));

    Ok(next.run(req).await)
}
