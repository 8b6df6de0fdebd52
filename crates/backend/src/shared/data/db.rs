use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Tables of the club, created on startup when missing
const SCHEMA: &[(&str, &str)] = &[
    (
        "sys_users",
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            email TEXT,
            password_hash TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_admin INTEGER NOT NULL DEFAULT 0,
            last_login_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a001_store",
        r#"
        CREATE TABLE IF NOT EXISTS a001_store (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            city TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT
        );
        "#,
    ),
    (
        "sys_user_stores",
        r#"
        CREATE TABLE IF NOT EXISTS sys_user_stores (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES sys_users(id),
            store_id TEXT NOT NULL REFERENCES a001_store(id),
            created_at TEXT NOT NULL,
            updated_at TEXT,
            UNIQUE (user_id, store_id)
        );
        "#,
    ),
    (
        "a002_member",
        r#"
        CREATE TABLE IF NOT EXISTS a002_member (
            id TEXT PRIMARY KEY NOT NULL,
            store_id TEXT NOT NULL REFERENCES a001_store(id),
            full_name TEXT NOT NULL,
            document TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            points_balance INTEGER NOT NULL DEFAULT 0,
            membership_expires_at TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT,
            UNIQUE (store_id, document)
        );
        "#,
    ),
];

pub async fn initialize_database(db_path: &std::path::Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_path.is_absolute() {
        db_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_path)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database connection already initialized"))?;

    tracing::info!("Database ready at {}", absolute_path.display());
    Ok(())
}

/// Create missing tables; safe to run on every start
pub async fn bootstrap_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for (table, ddl) in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create table {}: {}", table, e))?;
        tracing::debug!("Table {} ready", table);
    }
    Ok(())
}

/// Global connection pool.
///
/// # Panics
/// Panics when called before [`initialize_database`].
pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::test_db;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let db = test_db().await;
        bootstrap_schema(&db).await.unwrap();

        let rows = db
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|r| r.try_get::<String>("", "name").unwrap())
            .collect();
        for (table, _) in SCHEMA {
            assert!(names.contains(&table.to_string()), "missing {}", table);
        }
    }
}
