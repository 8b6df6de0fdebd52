use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::repository::{self, Column, Entity};
use crate::shared::data::repository::UnitOfWork;
use crate::shared::error::AppResult;

/// Stores a sync run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    AllStores,
    Stores(Vec<Uuid>),
}

impl SyncScope {
    pub fn for_session(is_admin: bool, stores: Vec<Uuid>) -> Self {
        if is_admin {
            Self::AllStores
        } else {
            Self::Stores(stores)
        }
    }
}

/// Deactivate active members whose membership expired before `now`.
/// Returns the number of members deactivated.
pub async fn deactivate_expired(
    db: &DatabaseConnection,
    scope: &SyncScope,
    now: DateTime<Utc>,
) -> AppResult<u64> {
    let mut update = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(false))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::IsActive.eq(true))
        .filter(Column::MembershipExpiresAt.lt(now));
    match scope {
        SyncScope::AllStores => {}
        SyncScope::Stores(stores) if stores.is_empty() => return Ok(0),
        SyncScope::Stores(stores) => update = update.filter(repository::in_stores(stores)),
    }

    let uow = UnitOfWork::begin(db).await?;
    let result = update.exec(uow.connection()).await?;
    uow.commit().await?;
    Ok(result.rows_affected)
}

/// Run the expiry check in the background after a login. Failures are
/// logged and dropped; the caller never waits for the outcome.
pub fn spawn_expiry_check(db: DatabaseConnection, scope: SyncScope) -> JoinHandle<()> {
    tokio::spawn(async move {
        match deactivate_expired(&db, &scope, Utc::now()).await {
            Ok(0) => {}
            Ok(count) => tracing::info!("Deactivated {} expired membership(s)", count),
            Err(e) => tracing::warn!("Membership expiry check failed: {}", e),
        }
    })
}
