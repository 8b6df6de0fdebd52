use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait};
use uuid::Uuid;

/// Identity and audit stamps shared by every persisted record
pub trait AuditedModel {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn created_at(&self) -> DateTime<Utc>;
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    fn set_updated_at(&mut self, at: Option<DateTime<Utc>>);

    /// Parsed identifier; nil when the stored text is not a UUID
    fn uuid(&self) -> Uuid {
        Uuid::parse_str(self.id()).unwrap_or_else(|_| Uuid::nil())
    }
}

/// Entity whose rows carry the audit columns
pub trait AuditedEntity: EntityTrait {
    /// Column written once at insertion and never by an update
    fn created_at_column() -> Self::Column;
}

/// An id is blank when it is empty, whitespace or the nil UUID
pub fn is_blank_id(id: &str) -> bool {
    let trimmed = id.trim();
    trimmed.is_empty() || Uuid::parse_str(trimmed).map(|u| u.is_nil()).unwrap_or(false)
}

/// Parses a stored id column into a UUID, nil on garbage
pub fn parse_id(id: &str) -> Uuid {
    Uuid::parse_str(id).unwrap_or_else(|_| Uuid::nil())
}

/// `column LIKE '%term%'` with the LIKE wildcards in `term` taken literally.
/// Case folding is whatever the store's LIKE does (ASCII-insensitive on SQLite).
pub fn contains_text<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '!') {
            pattern.push('!');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Expr::col(column).like(LikeExpr::new(pattern).escape('!'))
}

/// Implements [`AuditedModel`] and [`AuditedEntity`] for the `Model`/`Entity`
/// pair of the calling module. The model needs `id: String`,
/// `created_at: DateTime<Utc>` and `updated_at: Option<DateTime<Utc>>`.
#[macro_export]
macro_rules! audited_model {
    () => {
        impl $crate::shared::data::entity::AuditedModel for Model {
            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.created_at
            }

            fn set_created_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.created_at = at;
            }

            fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.updated_at
            }

            fn set_updated_at(&mut self, at: Option<chrono::DateTime<chrono::Utc>>) {
                self.updated_at = at;
            }
        }

        impl $crate::shared::data::entity::AuditedEntity for Entity {
            fn created_at_column() -> Column {
                Column::CreatedAt
            }
        }
    };
}
