use chrono::Utc;
use contracts::domain::a001_store::aggregate::Store;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::entity::{contains_text, parse_id};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_store")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub name: String,
    pub city: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

crate::audited_model!();

/// Columns a listing may be ordered by
pub const SORTABLE: &[&str] = &["code", "name", "city", "created_at"];

impl From<Model> for Store {
    fn from(m: Model) -> Self {
        Store {
            id: parse_id(&m.id),
            code: m.code,
            name: m.name,
            city: m.city,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Unsaved active store; the repository assigns id and stamps
pub fn new_model(code: &str, name: &str, city: Option<String>) -> Model {
    Model {
        id: String::new(),
        code: code.to_string(),
        name: name.to_string(),
        city,
        is_active: true,
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// Is the code taken by a store other than `except`
pub async fn code_in_use<C: ConnectionTrait>(
    conn: &C,
    code: &str,
    except: Option<Uuid>,
) -> Result<bool, DbErr> {
    let mut select = Entity::find().filter(Column::Code.eq(code));
    if let Some(id) = except {
        select = select.filter(Column::Id.ne(id.to_string()));
    }
    Ok(select.count(conn).await? > 0)
}

/// Which of the given ids belong to existing stores
pub async fn existing_ids<C: ConnectionTrait>(conn: &C, ids: &[Uuid]) -> Result<Vec<Uuid>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = Entity::find()
        .filter(Column::Id.is_in(ids.iter().map(Uuid::to_string)))
        .all(conn)
        .await?;
    Ok(rows.iter().map(|m| parse_id(&m.id)).collect())
}

/// Condition restricting stores to the given scopes
pub fn in_scope(scopes: &[Uuid]) -> Condition {
    Condition::all().add(Column::Id.is_in(scopes.iter().map(Uuid::to_string)))
}

/// Code or name contains the term
pub fn matching(term: &str) -> Condition {
    Condition::any()
        .add(contains_text(Column::Code, term))
        .add(contains_text(Column::Name, term))
}
