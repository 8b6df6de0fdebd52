//! Fixtures shared by the unit tests

use contracts::shared::envelope::CallerContext;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

use super::data::db::bootstrap_schema;

/// Fresh in-memory database with the club schema.
///
/// Pinned to one pooled connection: every SQLite `:memory:` connection is a
/// separate database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("in-memory sqlite");
    bootstrap_schema(&db).await.expect("schema bootstrap");
    db
}

pub fn admin_caller(user_id: Uuid) -> CallerContext {
    CallerContext {
        token: "test-token".to_owned(),
        user_id,
        is_admin: true,
        permitted_stores: Vec::new(),
    }
}

pub fn member_caller(user_id: Uuid, stores: Vec<Uuid>) -> CallerContext {
    CallerContext {
        token: "test-token".to_owned(),
        user_id,
        is_admin: false,
        permitted_stores: stores,
    }
}
