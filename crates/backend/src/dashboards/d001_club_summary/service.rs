use chrono::Utc;
use contracts::dashboards::d001_club_summary::{ClubSummary, StoreSummary};
use contracts::shared::envelope::CallerContext;
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::data::entity::parse_id;
use crate::shared::error::AppResult;

/// Club totals over the stores the caller may see
pub async fn summary(db: &DatabaseConnection, caller: &CallerContext) -> AppResult<ClubSummary> {
    let scope = if caller.is_admin {
        None
    } else {
        Some(caller.permitted_stores.as_slice())
    };
    let rows = repository::aggregate_by_store(db, scope, Utc::now()).await?;

    let mut summary = ClubSummary::default();
    for row in rows {
        summary.total_members += row.members as u64;
        summary.active_members += row.active_members as u64;
        summary.expired_memberships += row.expired_memberships as u64;
        summary.total_points += row.points;
        summary.stores.push(StoreSummary {
            store_id: parse_id(&row.store_id),
            store_code: row.store_code,
            store_name: row.store_name,
            members: row.members as u64,
            active_members: row.active_members as u64,
            points: row.points,
        });
    }

    tracing::debug!(
        "D001 Dashboard: {} members over {} stores",
        summary.total_members,
        summary.stores.len()
    );
    Ok(summary)
}
