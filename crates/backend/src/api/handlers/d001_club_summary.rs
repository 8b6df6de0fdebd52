use axum::response::Response;

use crate::dashboards::d001_club_summary::service;
use crate::shared::data::db::get_connection;
use crate::shared::error::respond;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/dashboards/club-summary
pub async fn get_club_summary(CurrentUser(caller): CurrentUser) -> Response {
    tracing::info!("D001 Dashboard: club summary requested by {}", caller.user_id);
    respond(service::summary(get_connection(), &caller).await)
}
