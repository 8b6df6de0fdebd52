use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, FromQueryResult, Statement, Value};
use uuid::Uuid;

/// Raw per-store aggregation
#[derive(Debug, Clone, FromQueryResult)]
pub struct StoreAggregation {
    pub store_id: String,
    pub store_code: String,
    pub store_name: String,
    pub members: i64,
    pub active_members: i64,
    pub expired_memberships: i64,
    pub points: i64,
}

/// Member totals per store, for every store or only the listed ones
pub async fn aggregate_by_store(
    db: &DatabaseConnection,
    stores: Option<&[Uuid]>,
    now: DateTime<Utc>,
) -> Result<Vec<StoreAggregation>, DbErr> {
    let mut values: Vec<Value> = vec![now.into()];
    let scope_filter = match stores {
        None => String::new(),
        Some([]) => return Ok(Vec::new()),
        Some(ids) => {
            values.extend(ids.iter().map(|id| Value::from(id.to_string())));
            let placeholders = vec!["?"; ids.len()].join(", ");
            format!("WHERE s.id IN ({})", placeholders)
        }
    };

    let sql = format!(
        r#"
        SELECT
            s.id AS store_id,
            s.code AS store_code,
            s.name AS store_name,
            COUNT(m.id) AS members,
            COALESCE(SUM(CASE WHEN m.is_active = 1 THEN 1 ELSE 0 END), 0) AS active_members,
            COALESCE(SUM(CASE WHEN m.membership_expires_at < ? THEN 1 ELSE 0 END), 0) AS expired_memberships,
            COALESCE(SUM(m.points_balance), 0) AS points
        FROM a001_store s
        LEFT JOIN a002_member m ON m.store_id = s.id
        {}
        GROUP BY s.id, s.code, s.name
        ORDER BY s.code
    "#,
        scope_filter
    );

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, &sql, values);
    StoreAggregation::find_by_statement(stmt).all(db).await
}
