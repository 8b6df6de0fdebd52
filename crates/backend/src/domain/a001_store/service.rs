use contracts::domain::a001_store::aggregate::{Store, StoreDto};
use contracts::shared::envelope::{EntityRequest, IdRequest, ListRequest};
use contracts::shared::paging::PagedResult;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use super::repository::{self, ActiveModel};
use crate::domain::a002_member::repository as members;
use crate::shared::data::repository::UnitOfWork;
use crate::shared::error::{AppError, AppResult};
use crate::shared::request::{optional_text, require_admin, require_entity, require_store, required_text};
use crate::system::users::repository::scopes;

/// Register a new store (administrators only)
pub async fn create(db: &DatabaseConnection, request: EntityRequest<StoreDto>) -> AppResult<Store> {
    require_admin(&request.caller)?;
    let dto = require_entity(request.entity)?;
    let code = required_text(&dto.code, "Store code")?;
    let name = required_text(&dto.name, "Store name")?;

    let uow = UnitOfWork::begin(db).await?;
    if repository::code_in_use(uow.connection(), &code, None).await? {
        return Err(AppError::validation(format!("Store code {} is already in use", code)));
    }

    let mut model = repository::new_model(&code, &name, optional_text(dto.city));
    model.is_active = dto.is_active;
    let saved = uow.repository::<ActiveModel>().insert(model).await?;
    uow.commit().await?;

    tracing::info!("Store {} created", saved.code);
    Ok(saved.into())
}

pub async fn update(db: &DatabaseConnection, request: EntityRequest<StoreDto>) -> AppResult<Store> {
    require_admin(&request.caller)?;
    let dto = require_entity(request.entity)?;
    let id = dto
        .id
        .ok_or_else(|| AppError::validation("To edit a store its id must be provided"))?;
    let code = required_text(&dto.code, "Store code")?;
    let name = required_text(&dto.name, "Store name")?;

    let uow = UnitOfWork::begin(db).await?;
    let repo = uow.repository::<ActiveModel>();
    let mut model = repo.get_by_id(id).await?;
    if repository::code_in_use(uow.connection(), &code, Some(id)).await? {
        return Err(AppError::validation(format!("Store code {} is already in use", code)));
    }

    model.code = code;
    model.name = name;
    model.city = optional_text(dto.city);
    model.is_active = dto.is_active;
    let saved = repo.update(model).await?;
    uow.commit().await?;

    Ok(saved.into())
}

/// Remove a store without members, together with the user scopes on it
pub async fn delete(db: &DatabaseConnection, request: IdRequest) -> AppResult<()> {
    require_admin(&request.caller)?;
    if request.id.is_nil() {
        return Err(AppError::validation("To delete a store its id must be provided"));
    }

    let uow = UnitOfWork::begin(db).await?;
    let store_id = request.id.to_string();
    let member_count = members::Entity::find()
        .filter(members::Column::StoreId.eq(store_id.as_str()))
        .count(uow.connection())
        .await?;
    if member_count > 0 {
        return Err(AppError::validation(format!(
            "The store still has {} club member(s) and cannot be deleted",
            member_count
        )));
    }

    scopes::Entity::delete_many()
        .filter(scopes::Column::StoreId.eq(store_id.as_str()))
        .exec(uow.connection())
        .await?;
    uow.repository::<ActiveModel>().delete(request.id).await?;
    uow.commit().await?;

    tracing::info!("Store {} deleted", store_id);
    Ok(())
}

pub async fn get_by_id(db: &DatabaseConnection, request: IdRequest) -> AppResult<Store> {
    require_store(&request.caller, request.id)?;
    let uow = UnitOfWork::begin(db).await?;
    let model = uow.repository::<ActiveModel>().get_by_id(request.id).await?;
    Ok(model.into())
}

/// Page of stores visible to the caller
pub async fn list_page(db: &DatabaseConnection, request: ListRequest) -> AppResult<PagedResult<Store>> {
    let uow = UnitOfWork::begin(db).await?;
    let repo = uow.repository::<ActiveModel>();

    let mut select = repo.query();
    if !request.caller.is_admin {
        select = select.filter(repository::in_scope(&request.caller.permitted_stores));
    }
    if let Some(term) = request.query.search_term() {
        select = select.filter(repository::matching(term));
    }

    let (items, total) = repo
        .fetch_page(select, &request.query, repository::SORTABLE)
        .await?;
    Ok(PagedResult::new(items, &request.query, total).map(Store::from))
}
