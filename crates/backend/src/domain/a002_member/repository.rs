use chrono::Utc;
use contracts::domain::a002_member::aggregate::Member;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::entity::{contains_text, parse_id};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub store_id: String,
    pub full_name: String,
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub points_balance: i64,
    pub membership_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

crate::audited_model!();

pub const SORTABLE: &[&str] = &[
    "full_name",
    "document",
    "points_balance",
    "membership_expires_at",
    "created_at",
];

impl From<Model> for Member {
    fn from(m: Model) -> Self {
        Member {
            id: parse_id(&m.id),
            store_id: parse_id(&m.store_id),
            full_name: m.full_name,
            document: m.document,
            email: m.email,
            phone: m.phone,
            points_balance: m.points_balance,
            membership_expires_at: m.membership_expires_at,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl Model {
    pub fn store_uuid(&self) -> Uuid {
        parse_id(&self.store_id)
    }
}

pub fn new_model(store_id: Uuid, full_name: &str, document: &str) -> Model {
    Model {
        id: String::new(),
        store_id: store_id.to_string(),
        full_name: full_name.to_string(),
        document: document.to_string(),
        email: None,
        phone: None,
        points_balance: 0,
        membership_expires_at: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// Is the document registered at the store for a member other than `except`
pub async fn document_in_use<C: ConnectionTrait>(
    conn: &C,
    store_id: Uuid,
    document: &str,
    except: Option<Uuid>,
) -> Result<bool, DbErr> {
    let mut select = Entity::find()
        .filter(Column::StoreId.eq(store_id.to_string()))
        .filter(Column::Document.eq(document));
    if let Some(id) = except {
        select = select.filter(Column::Id.ne(id.to_string()));
    }
    Ok(select.count(conn).await? > 0)
}

pub fn in_stores(stores: &[Uuid]) -> Condition {
    Condition::all().add(Column::StoreId.is_in(stores.iter().map(Uuid::to_string)))
}

/// Match on name or document
pub fn matching(term: &str) -> Condition {
    Condition::any()
        .add(contains_text(Column::FullName, term))
        .add(contains_text(Column::Document, term))
}
