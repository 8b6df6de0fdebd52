use std::marker::PhantomData;
use std::str::FromStr;

use chrono::Utc;
use contracts::shared::paging::{ListQuery, PAGE_SIZE};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, IntoActiveModel, Iterable, Order, PaginatorTrait, PrimaryKeyTrait,
    QueryOrder, QuerySelect, Select, TransactionTrait,
};
use uuid::Uuid;

use super::entity::{is_blank_id, AuditedEntity, AuditedModel};
use crate::shared::error::{AppError, AppResult};

type EntityOf<A> = <A as ActiveModelTrait>::Entity;
type ModelOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

// ============================================================================
// Unit of work
// ============================================================================

/// One database transaction scoped to a single business operation.
///
/// Repositories borrow it; nothing reaches the store until [`commit`].
/// Dropping it uncommitted rolls everything back and releases the connection.
///
/// [`commit`]: UnitOfWork::commit
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> AppResult<Self> {
        let txn = db
            .begin()
            .await
            .map_err(|e| AppError::Persistence(format!("Failed to open the database session: {}", e)))?;
        Ok(Self { txn })
    }

    /// Typed repository over this unit of work
    pub fn repository<A: ActiveModelTrait>(&self) -> Repository<'_, A> {
        Repository {
            txn: &self.txn,
            _active: PhantomData,
        }
    }

    /// Raw connection for statements the generic repository does not cover
    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> AppResult<()> {
        self.txn
            .commit()
            .await
            .map_err(|e| AppError::Persistence(format!("Failed to save changes: {}", e)))
    }
}

// ============================================================================
// Generic repository
// ============================================================================

/// CRUD over one audited entity, parameterized by its sea-orm active model
pub struct Repository<'uow, A> {
    txn: &'uow DatabaseTransaction,
    _active: PhantomData<fn() -> A>,
}

impl<'uow, A> Repository<'uow, A>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + Sync + 'static,
    EntityOf<A>: AuditedEntity,
    ModelOf<A>: AuditedModel + IntoActiveModel<A> + Send + Sync + 'static,
    <<EntityOf<A> as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    /// Adds a new record. Stamps `created_at`, clears `updated_at` and
    /// assigns a fresh id when the supplied one is blank.
    pub async fn insert(&self, mut model: ModelOf<A>) -> AppResult<ModelOf<A>> {
        model.set_created_at(Utc::now());
        model.set_updated_at(None);
        if is_blank_id(model.id()) {
            model.set_id(Uuid::new_v4().to_string());
        }

        let mut active: A = model.into_active_model();
        mark_all_changed(&mut active);
        active
            .insert(self.txn)
            .await
            .map_err(|e| store_error("Failed to insert the entity", e))
    }

    /// Saves every column except `created_at` and stamps `updated_at`
    pub async fn update(&self, mut model: ModelOf<A>) -> AppResult<ModelOf<A>> {
        let now = Utc::now().max(model.created_at());
        model.set_updated_at(Some(now));

        let mut active: A = model.into_active_model();
        mark_all_changed(&mut active);
        active.not_set(<EntityOf<A> as AuditedEntity>::created_at_column());
        active
            .update(self.txn)
            .await
            .map_err(|e| store_error("Failed to update the entity", e))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if id.is_nil() {
            return Err(AppError::validation(
                "To delete a record the entity id must be provided",
            ));
        }

        let model = <EntityOf<A> as EntityTrait>::find_by_id(id.to_string())
            .one(self.txn)
            .await
            .map_err(|e| store_error("Failed to delete the entity", e))?
            .ok_or_else(|| {
                AppError::NotFound(
                    "No record found for the given id. Refresh the page and try again".into(),
                )
            })?;

        let active: A = model.into_active_model();
        active
            .delete(self.txn)
            .await
            .map_err(|e| store_error("Failed to delete the entity", e))?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ModelOf<A>> {
        if id.is_nil() {
            return Err(AppError::validation(
                "To fetch a record the entity id must be provided",
            ));
        }

        <EntityOf<A> as EntityTrait>::find_by_id(id.to_string())
            .one(self.txn)
            .await
            .map_err(|e| store_error("Failed to fetch the entity", e))?
            .ok_or_else(|| AppError::NotFound("Record not found".into()))
    }

    /// Composable select over the whole entity set
    pub fn query(&self) -> Select<EntityOf<A>> {
        <EntityOf<A> as EntityTrait>::find()
    }

    pub fn connection(&self) -> &'uow DatabaseTransaction {
        self.txn
    }

    /// Counts the filtered set and loads one page of it.
    ///
    /// `order_by` must name a column listed in `sortable`; anything else
    /// falls back to creation order.
    pub async fn fetch_page(
        &self,
        select: Select<EntityOf<A>>,
        query: &ListQuery,
        sortable: &[&str],
    ) -> AppResult<(Vec<ModelOf<A>>, u64)> {
        let total = select
            .clone()
            .count(self.txn)
            .await
            .map_err(|e| store_error("Failed to count records", e))?;

        let column = query
            .order_by
            .as_deref()
            .filter(|name| sortable.contains(name))
            .and_then(|name| <EntityOf<A> as EntityTrait>::Column::from_str(name).ok())
            .unwrap_or_else(<EntityOf<A> as AuditedEntity>::created_at_column);
        let order = if query.descending {
            Order::Desc
        } else {
            Order::Asc
        };

        // Pages past the end are empty; the page number comes from the client
        let offset = query.page_index().saturating_mul(PAGE_SIZE);
        if offset >= total {
            return Ok((Vec::new(), total));
        }

        let items = select
            .order_by(column, order)
            .limit(PAGE_SIZE)
            .offset(offset)
            .all(self.txn)
            .await
            .map_err(|e| store_error("Failed to load records", e))?;

        Ok((items, total))
    }
}

/// Turns every loaded value into a pending write
fn mark_all_changed<A: ActiveModelTrait>(active: &mut A) {
    for column in <EntityOf<A> as EntityTrait>::Column::iter() {
        if let ActiveValue::Unchanged(value) = active.get(column) {
            active.set(column, value);
        }
    }
}

fn store_error(context: &str, e: DbErr) -> AppError {
    AppError::Persistence(format!("{}: {}", context, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_store::repository::{self as stores, ActiveModel, Model};
    use crate::shared::test_support::test_db;
    use sea_orm::{ColumnTrait, QueryFilter};

    fn store(code: &str) -> Model {
        stores::new_model(code, &format!("Store {}", code), None)
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids_and_stamps() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();

        let first = repo.insert(store("S1")).await.unwrap();
        let second = repo.insert(store("S2")).await.unwrap();
        uow.commit().await.unwrap();

        assert!(!is_blank_id(&first.id));
        assert!(!is_blank_id(&second.id));
        assert_ne!(first.id, second.id);
        assert!(first.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_insert_keeps_supplied_id() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let id = Uuid::new_v4();
        let mut model = store("S1");
        model.id = id.to_string();

        let saved = uow.repository::<ActiveModel>().insert(model).await.unwrap();
        assert_eq!(saved.id, id.to_string());
    }

    #[tokio::test]
    async fn test_update_stamps_updated_at_and_keeps_created_at() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();

        let saved = repo.insert(store("S1")).await.unwrap();
        let created_at = saved.created_at;

        let mut edited = saved.clone();
        edited.name = "Renamed".into();
        edited.created_at = created_at + chrono::Duration::days(365);
        let updated = repo.update(edited).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.created_at, created_at);
        let updated_at = updated.updated_at.expect("updated_at set on edit");
        assert!(updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_nil_id_is_rejected_before_store() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();

        assert!(matches!(
            repo.delete(Uuid::nil()).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            repo.get_by_id(Uuid::nil()).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found_and_store_unchanged() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();
        repo.insert(store("S1")).await.unwrap();

        let missing = Uuid::new_v4();
        assert!(matches!(
            repo.delete(missing).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            repo.get_by_id(missing).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(repo.query().count(repo.connection()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();
        let saved = repo.insert(store("S1")).await.unwrap();

        repo.delete(Uuid::parse_str(&saved.id).unwrap()).await.unwrap();
        assert_eq!(repo.query().count(repo.connection()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_is_rolled_back() {
        let db = test_db().await;
        {
            let uow = UnitOfWork::begin(&db).await.unwrap();
            uow.repository::<ActiveModel>()
                .insert(store("S1"))
                .await
                .unwrap();
        }

        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();
        assert_eq!(repo.query().count(repo.connection()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fetch_page_orders_and_filters() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();
        for i in 0..25 {
            repo.insert(store(&format!("C{:02}", i))).await.unwrap();
        }

        let query = ListQuery {
            page: 2,
            order_by: Some("code".into()),
            descending: true,
            search: None,
        };
        let (items, total) = repo
            .fetch_page(repo.query(), &query, &["code"])
            .await
            .unwrap();
        assert_eq!(total, 25);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].code, "C04");

        let filtered = repo
            .query()
            .filter(stores::Column::Code.starts_with("C1"));
        let (items, total) = repo
            .fetch_page(filtered, &ListQuery::default(), &["code"])
            .await
            .unwrap();
        assert_eq!(total, 10);
        assert_eq!(items.len(), 10);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();
        repo.insert(store("S1")).await.unwrap();

        for page in [2, u64::MAX] {
            let query = ListQuery {
                page,
                ..Default::default()
            };
            let (items, total) = repo.fetch_page(repo.query(), &query, &[]).await.unwrap();
            assert!(items.is_empty());
            assert_eq!(total, 1);
        }
    }

    #[tokio::test]
    async fn test_unlisted_sort_column_falls_back() {
        let db = test_db().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<ActiveModel>();
        repo.insert(store("B")).await.unwrap();
        repo.insert(store("A")).await.unwrap();

        let query = ListQuery {
            order_by: Some("code".into()),
            ..Default::default()
        };
        let (items, _) = repo.fetch_page(repo.query(), &query, &[]).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].code, "B");
    }
}
