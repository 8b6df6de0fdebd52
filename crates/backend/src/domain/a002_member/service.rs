use contracts::domain::a002_member::aggregate::{Member, MemberDto, PointsAdjustmentDto};
use contracts::shared::envelope::{CallerContext, EntityRequest, IdRequest, ListRequest};
use contracts::shared::paging::PagedResult;
use sea_orm::{DatabaseConnection, QueryFilter};
use uuid::Uuid;

use super::repository::{self, ActiveModel};
use crate::domain::a001_store::repository as stores;
use crate::shared::data::repository::UnitOfWork;
use crate::shared::error::{AppError, AppResult};
use crate::shared::request::{
    check_email, optional_text, require_entity, require_store, required_text,
};

struct MemberFields {
    full_name: String,
    document: String,
    email: Option<String>,
    phone: Option<String>,
}

fn validate(dto: &MemberDto) -> AppResult<MemberFields> {
    let full_name = required_text(&dto.full_name, "Full name")?;
    let document = required_text(&dto.document, "Document")?;
    let email = optional_text(dto.email.clone());
    check_email(&email)?;
    Ok(MemberFields {
        full_name,
        document,
        email,
        phone: optional_text(dto.phone.clone()),
    })
}

async fn ensure_store_exists(uow: &UnitOfWork, store_id: Uuid) -> AppResult<()> {
    uow.repository::<stores::ActiveModel>()
        .get_by_id(store_id)
        .await
        .map(|_| ())
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Store not found".into()),
            other => other,
        })
}

async fn ensure_document_free(
    uow: &UnitOfWork,
    store_id: Uuid,
    document: &str,
    except: Option<Uuid>,
) -> AppResult<()> {
    if repository::document_in_use(uow.connection(), store_id, document, except).await? {
        return Err(AppError::validation(format!(
            "A member with document {} is already registered at this store",
            document
        )));
    }
    Ok(())
}

/// Loads a member and checks the caller may act on its store
async fn load_in_scope(
    uow: &UnitOfWork,
    caller: &CallerContext,
    id: Uuid,
) -> AppResult<repository::Model> {
    let model = uow.repository::<ActiveModel>().get_by_id(id).await?;
    require_store(caller, model.store_uuid())?;
    Ok(model)
}

pub async fn create(db: &DatabaseConnection, request: EntityRequest<MemberDto>) -> AppResult<Member> {
    let dto = require_entity(request.entity)?;
    require_store(&request.caller, dto.store_id)?;
    let fields = validate(&dto)?;

    let uow = UnitOfWork::begin(db).await?;
    ensure_store_exists(&uow, dto.store_id).await?;
    ensure_document_free(&uow, dto.store_id, &fields.document, None).await?;

    let mut model = repository::new_model(dto.store_id, &fields.full_name, &fields.document);
    model.email = fields.email;
    model.phone = fields.phone;
    model.membership_expires_at = dto.membership_expires_at;
    model.is_active = dto.is_active;
    let saved = uow.repository::<ActiveModel>().insert(model).await?;
    uow.commit().await?;

    tracing::info!("Member {} registered at store {}", saved.id, saved.store_id);
    Ok(saved.into())
}

/// Edit member data. The points balance is only changed by [`adjust_points`].
pub async fn update(db: &DatabaseConnection, request: EntityRequest<MemberDto>) -> AppResult<Member> {
    let dto = require_entity(request.entity)?;
    let id = dto
        .id
        .ok_or_else(|| AppError::validation("To edit a member its id must be provided"))?;
    require_store(&request.caller, dto.store_id)?;
    let fields = validate(&dto)?;

    let uow = UnitOfWork::begin(db).await?;
    let mut model = load_in_scope(&uow, &request.caller, id).await?;
    if model.store_uuid() != dto.store_id {
        ensure_store_exists(&uow, dto.store_id).await?;
    }
    ensure_document_free(&uow, dto.store_id, &fields.document, Some(id)).await?;

    model.store_id = dto.store_id.to_string();
    model.full_name = fields.full_name;
    model.document = fields.document;
    model.email = fields.email;
    model.phone = fields.phone;
    model.membership_expires_at = dto.membership_expires_at;
    model.is_active = dto.is_active;
    let saved = uow.repository::<ActiveModel>().update(model).await?;
    uow.commit().await?;

    Ok(saved.into())
}

pub async fn delete(db: &DatabaseConnection, request: IdRequest) -> AppResult<()> {
    if request.id.is_nil() {
        return Err(AppError::validation("To delete a member its id must be provided"));
    }
    let uow = UnitOfWork::begin(db).await?;
    load_in_scope(&uow, &request.caller, request.id).await?;
    uow.repository::<ActiveModel>().delete(request.id).await?;
    uow.commit().await?;
    Ok(())
}

/// Apply a signed change to the points balance, which never goes below zero
pub async fn adjust_points(
    db: &DatabaseConnection,
    request: EntityRequest<PointsAdjustmentDto>,
) -> AppResult<Member> {
    let dto = require_entity(request.entity)?;
    if dto.delta == 0 {
        return Err(AppError::validation("The adjustment must change the balance"));
    }

    let uow = UnitOfWork::begin(db).await?;
    let mut model = load_in_scope(&uow, &request.caller, dto.member_id).await?;
    let balance = model
        .points_balance
        .checked_add(dto.delta)
        .filter(|b| *b >= 0)
        .ok_or_else(|| {
            AppError::validation(format!(
                "Insufficient points: balance is {}, adjustment is {}",
                model.points_balance, dto.delta
            ))
        })?;

    model.points_balance = balance;
    let saved = uow.repository::<ActiveModel>().update(model).await?;
    uow.commit().await?;

    tracing::info!(
        member = %saved.id,
        delta = dto.delta,
        reason = dto.reason.as_deref().unwrap_or(""),
        "Points adjusted"
    );
    Ok(saved.into())
}

pub async fn get_by_id(db: &DatabaseConnection, request: IdRequest) -> AppResult<Member> {
    let uow = UnitOfWork::begin(db).await?;
    let model = load_in_scope(&uow, &request.caller, request.id).await?;
    Ok(model.into())
}

pub async fn list_page(db: &DatabaseConnection, request: ListRequest) -> AppResult<PagedResult<Member>> {
    let uow = UnitOfWork::begin(db).await?;
    let repo = uow.repository::<ActiveModel>();

    let mut select = repo.query();
    if !request.caller.is_admin {
        select = select.filter(repository::in_stores(&request.caller.permitted_stores));
    }
    if let Some(term) = request.query.search_term() {
        select = select.filter(repository::matching(term));
    }

    let (items, total) = repo
        .fetch_page(select, &request.query, repository::SORTABLE)
        .await?;
    Ok(PagedResult::new(items, &request.query, total).map(Member::from))
}
