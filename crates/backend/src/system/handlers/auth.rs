use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use contracts::shared::envelope::ResultEnvelope;
use contracts::system::auth::{LoginRequest, PasswordRecoveryRequest, SessionInfo, TokenClaims};

use crate::domain::a002_member::membership_sync::{self, SyncScope};
use crate::shared::data::db::get_connection;
use crate::shared::error::respond;
use crate::shared::mail;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::sessions;
use crate::system::users::service as user_service;

/// POST /api/system/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> Response {
    let db = get_connection();
    let result = user_service::login(db, request).await;

    // Fire and forget: the response does not wait for the expiry check
    if let Ok(session) = &result {
        membership_sync::spawn_expiry_check(
            db.clone(),
            SyncScope::for_session(session.is_admin, session.permitted_stores.clone()),
        );
    }

    respond(result)
}

/// POST /api/system/auth/logout
pub async fn logout(
    CurrentUser(caller): CurrentUser,
    Extension(claims): Extension<TokenClaims>,
) -> Response {
    sessions::revoke(&caller.token, claims.exp);
    tracing::info!("User {} logged out", claims.username);
    respond(Ok(()))
}

/// GET /api/system/auth/me
pub async fn current_user(
    CurrentUser(caller): CurrentUser,
    Extension(claims): Extension<TokenClaims>,
) -> Response {
    respond(Ok(SessionInfo {
        token: caller.token,
        user_id: caller.user_id,
        username: claims.username,
        display_name: claims.display_name,
        is_admin: caller.is_admin,
        permitted_stores: caller.permitted_stores,
    }))
}

/// POST /api/system/auth/recover-password
pub async fn recover_password(Json(request): Json<PasswordRecoveryRequest>) -> Response {
    let mailer = mail::mailer();
    match user_service::recover_password(get_connection(), request, mailer.as_ref()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ResultEnvelope::info((), user_service::RECOVERY_SENT)),
        )
            .into_response(),
        Err(e) => respond::<()>(Err(e)),
    }
}
