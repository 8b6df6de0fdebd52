use std::collections::HashMap;

use chrono::{DateTime, Utc};
use contracts::system::users::User;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, DatabaseBackend, QueryFilter, Statement};
use uuid::Uuid;

use crate::shared::data::entity::{contains_text, parse_id};
use crate::shared::data::repository::UnitOfWork;
use crate::shared::error::AppResult;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sys_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

crate::audited_model!();

pub const SORTABLE: &[&str] = &["username", "full_name", "email", "created_at", "last_login_at"];

/// Store scopes of a user (`sys_user_stores`)
pub mod scopes {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "sys_user_stores")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub user_id: String,
        pub store_id: String,
        pub created_at: chrono::DateTime<chrono::Utc>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    crate::audited_model!();
}

impl Model {
    /// Name shown in the session; falls back to the username
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    pub fn into_user(self, store_ids: Vec<Uuid>) -> User {
        User {
            id: parse_id(&self.id),
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            is_active: self.is_active,
            is_admin: self.is_admin,
            store_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_login_at: self.last_login_at,
        }
    }
}

pub fn new_model(username: &str, full_name: &str, password_hash: String) -> Model {
    Model {
        id: String::new(),
        username: username.to_string(),
        full_name: full_name.to_string(),
        email: None,
        password_hash,
        is_active: true,
        is_admin: false,
        last_login_at: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub async fn get_by_username<C: ConnectionTrait>(conn: &C, username: &str) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(conn)
        .await
}

/// Permitted stores of one user
pub async fn store_ids<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
    let rows = scopes::Entity::find()
        .filter(scopes::Column::UserId.eq(user_id.to_string()))
        .all(conn)
        .await?;
    Ok(rows.iter().map(|r| parse_id(&r.store_id)).collect())
}

/// Permitted stores of several users at once
pub async fn store_ids_by_user<C: ConnectionTrait>(
    conn: &C,
    user_ids: &[String],
) -> Result<HashMap<String, Vec<Uuid>>, DbErr> {
    let rows = scopes::Entity::find()
        .filter(scopes::Column::UserId.is_in(user_ids.iter().cloned()))
        .all(conn)
        .await?;
    let mut map: HashMap<String, Vec<Uuid>> = HashMap::new();
    for row in rows {
        map.entry(row.user_id)
            .or_default()
            .push(parse_id(&row.store_id));
    }
    Ok(map)
}

/// Replace the store scopes of a user inside the unit of work
pub async fn replace_scopes(uow: &UnitOfWork, user_id: Uuid, stores: &[Uuid]) -> AppResult<()> {
    remove_scopes(uow, user_id).await?;
    let repo = uow.repository::<scopes::ActiveModel>();
    for store_id in stores {
        repo.insert(scopes::Model {
            id: String::new(),
            user_id: user_id.to_string(),
            store_id: store_id.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        })
        .await?;
    }
    Ok(())
}

pub async fn remove_scopes(uow: &UnitOfWork, user_id: Uuid) -> AppResult<()> {
    scopes::Entity::delete_many()
        .filter(scopes::Column::UserId.eq(user_id.to_string()))
        .exec(uow.connection())
        .await?;
    Ok(())
}

/// Username or full name contains the term
pub fn matching(term: &str) -> Condition {
    Condition::any()
        .add(contains_text(Column::Username, term))
        .add(contains_text(Column::FullName, term))
}

/// Record a login without touching the edit stamp
pub async fn update_last_login<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    at: DateTime<Utc>,
) -> Result<(), DbErr> {
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
        [at.into(), user_id.into()],
    ))
    .await?;
    Ok(())
}

pub async fn count_users<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    Entity::find().count(conn).await
}
