use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::handlers;
use crate::system;
use crate::system::auth::middleware::require_auth;

/// Configure all application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/recover-password",
            post(system::handlers::auth::recover_password),
        )
        .merge(protected_routes().layer(middleware::from_fn(require_auth)))
}

/// Routes that need a valid session; permissions are checked by the services
fn protected_routes() -> Router {
    Router::new()
        // ========================================
        // SYSTEM AUTH ROUTES (PROTECTED)
        // ========================================
        .route("/api/system/auth/me", get(system::handlers::auth::current_user))
        .route("/api/system/auth/logout", post(system::handlers::auth::logout))
        // ========================================
        // SYSTEM USERS MANAGEMENT
        // ========================================
        .route(
            "/api/system/users",
            get(system::handlers::users::list).post(system::handlers::users::create),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete),
        )
        // ========================================
        // BUSINESS ROUTES
        // ========================================
        // A001 Store handlers
        .route(
            "/api/stores",
            get(handlers::a001_store::list).post(handlers::a001_store::create),
        )
        .route(
            "/api/stores/:id",
            get(handlers::a001_store::get_by_id)
                .put(handlers::a001_store::update)
                .delete(handlers::a001_store::delete),
        )
        // A002 Member handlers
        .route(
            "/api/members",
            get(handlers::a002_member::list).post(handlers::a002_member::create),
        )
        .route(
            "/api/members/:id",
            get(handlers::a002_member::get_by_id)
                .put(handlers::a002_member::update)
                .delete(handlers::a002_member::delete),
        )
        .route(
            "/api/members/:id/points",
            post(handlers::a002_member::adjust_points),
        )
        // D001 Club summary dashboard
        .route(
            "/api/dashboards/club-summary",
            get(handlers::d001_club_summary::get_club_summary),
        )
}
