use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::shared::envelope::CallerContext;
use contracts::system::auth::TokenClaims;
use uuid::Uuid;

use super::middleware::AuthToken;

/// Caller of the current request, built from the session set by `require_auth`.
/// Usage in handlers: `async fn handler(CurrentUser(caller): CurrentUser) -> Response`
pub struct CurrentUser(pub CallerContext);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<TokenClaims>()
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let token = parts
            .extensions
            .get::<AuthToken>()
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)?;

        Ok(CurrentUser(CallerContext {
            token: token.0.clone(),
            user_id,
            is_admin: claims.is_admin,
            permitted_stores: claims.stores.clone(),
        }))
    }
}
