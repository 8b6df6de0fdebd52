use chrono::Utc;
use contracts::shared::envelope::{EntityRequest, IdRequest, ListRequest};
use contracts::shared::paging::PagedResult;
use contracts::system::auth::{LoginRequest, PasswordRecoveryRequest, SessionInfo};
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use sea_orm::{DatabaseConnection, QueryFilter};
use uuid::Uuid;

use super::repository::{self, ActiveModel};
use crate::domain::a001_store::repository as stores;
use crate::shared::config::AuthConfig;
use crate::shared::data::entity::AuditedModel;
use crate::shared::data::repository::UnitOfWork;
use crate::shared::error::{AppError, AppResult};
use crate::shared::mail::{MailMessage, MailSender};
use crate::shared::request::{
    check_email, optional_text, require_admin, require_entity, required_text,
};
use crate::system::auth::jwt::{self, SessionSubject};
use crate::system::auth::password;

/// Same answer for every failed login
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Same answer for every recovery request that did not fail in transit
pub const RECOVERY_SENT: &str =
    "If the account exists and has an e-mail address, a new password has been sent to it";

fn security_error(e: anyhow::Error) -> AppError {
    tracing::error!("Credential processing failed: {:#}", e);
    AppError::Persistence("Failed to process the credentials".into())
}

/// Distinct store ids, all of which must exist
async fn checked_stores(uow: &UnitOfWork, requested: &[Uuid]) -> AppResult<Vec<Uuid>> {
    let mut wanted = requested.to_vec();
    wanted.sort();
    wanted.dedup();
    let existing = stores::existing_ids(uow.connection(), &wanted).await?;
    if existing.len() != wanted.len() {
        return Err(AppError::validation("One or more permitted stores do not exist"));
    }
    Ok(wanted)
}

/// Create a new user (administrators only)
pub async fn create(db: &DatabaseConnection, request: EntityRequest<CreateUserDto>) -> AppResult<User> {
    require_admin(&request.caller)?;
    let dto = require_entity(request.entity)?;

    let username = required_text(&dto.username, "Username")?;
    if dto.password.trim().is_empty() {
        return Err(AppError::validation("Password is required"));
    }
    let email = optional_text(dto.email);
    check_email(&email)?;

    let uow = UnitOfWork::begin(db).await?;
    if repository::get_by_username(uow.connection(), &username).await?.is_some() {
        return Err(AppError::validation("Username already exists"));
    }
    let store_ids = checked_stores(&uow, &dto.store_ids).await?;

    let password_hash = password::hash_password(&dto.password).map_err(security_error)?;
    let mut model = repository::new_model(&username, dto.full_name.trim(), password_hash);
    model.email = email;
    model.is_admin = dto.is_admin;

    let saved = uow.repository::<ActiveModel>().insert(model).await?;
    repository::replace_scopes(&uow, saved.uuid(), &store_ids).await?;
    uow.commit().await?;

    tracing::info!("User {} created", saved.username);
    Ok(saved.into_user(store_ids))
}

/// Edit an account. The caller re-confirms their own password first;
/// administrator-only fields are ignored for everyone else.
pub async fn update(db: &DatabaseConnection, request: EntityRequest<UpdateUserDto>) -> AppResult<User> {
    let caller = request.caller;
    let dto = require_entity(request.entity)?;
    if !caller.is_admin && dto.id != caller.user_id {
        return Err(AppError::Authorization(
            "You may only edit your own account".into(),
        ));
    }

    let uow = UnitOfWork::begin(db).await?;
    let repo = uow.repository::<ActiveModel>();

    let caller_hash = repo
        .get_by_id(caller.user_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Authentication("Current password is incorrect".into()),
            other => other,
        })?
        .password_hash;
    if !password::verify_password(&dto.current_password, &caller_hash).map_err(security_error)? {
        return Err(AppError::Authentication("Current password is incorrect".into()));
    }

    let mut model = repo.get_by_id(dto.id).await?;
    let email = optional_text(dto.email);
    check_email(&email)?;
    model.full_name = dto.full_name.trim().to_string();
    model.email = email;

    if let Some(new_password) = dto.new_password.filter(|p| !p.trim().is_empty()) {
        model.password_hash = password::hash_password(&new_password).map_err(security_error)?;
    }

    let store_ids = if caller.is_admin {
        model.is_active = dto.is_active;
        model.is_admin = dto.is_admin;
        let store_ids = checked_stores(&uow, &dto.store_ids).await?;
        repository::replace_scopes(&uow, dto.id, &store_ids).await?;
        store_ids
    } else {
        repository::store_ids(uow.connection(), dto.id).await?
    };

    let saved = repo.update(model).await?;
    uow.commit().await?;

    Ok(saved.into_user(store_ids))
}

/// Remove an account and its store scopes (administrators only)
pub async fn delete(db: &DatabaseConnection, request: IdRequest) -> AppResult<()> {
    require_admin(&request.caller)?;
    if request.id == request.caller.user_id {
        return Err(AppError::validation("You cannot delete your own account"));
    }

    let uow = UnitOfWork::begin(db).await?;
    let repo = uow.repository::<ActiveModel>();
    let model = repo.get_by_id(request.id).await?;
    repository::remove_scopes(&uow, request.id).await?;
    repo.delete(request.id).await?;
    uow.commit().await?;

    tracing::info!("User {} deleted", model.username);
    Ok(())
}

/// Check credentials and open a session
pub async fn login(db: &DatabaseConnection, request: LoginRequest) -> AppResult<SessionInfo> {
    let denied = || AppError::Authentication(INVALID_CREDENTIALS.into());

    let uow = UnitOfWork::begin(db).await?;
    let found = repository::get_by_username(uow.connection(), request.username.trim()).await?;
    // Unknown and inactive accounts still pay for one hash check
    let stored_hash = found
        .as_ref()
        .filter(|m| m.is_active)
        .map(|m| m.password_hash.as_str());
    let verified = password::verify_or_dummy(&request.password, stored_hash);
    let model = match found {
        Some(model) if model.is_active && verified => model,
        Some(model) if !model.is_active => {
            tracing::info!("Login refused for inactive user {}", model.username);
            return Err(denied());
        }
        _ => return Err(denied()),
    };

    let user_id = model.uuid();
    let permitted_stores = repository::store_ids(uow.connection(), user_id).await?;
    let token = jwt::generate_access_token(&SessionSubject {
        user_id,
        username: &model.username,
        display_name: model.display_name(),
        is_admin: model.is_admin,
        stores: &permitted_stores,
    })
    .map_err(security_error)?;

    repository::update_last_login(uow.connection(), &model.id, Utc::now()).await?;
    uow.commit().await?;

    tracing::info!("User {} logged in", model.username);
    Ok(SessionInfo {
        token,
        user_id,
        display_name: model.display_name().to_string(),
        username: model.username,
        is_admin: model.is_admin,
        permitted_stores,
    })
}

pub async fn get_by_id(db: &DatabaseConnection, request: IdRequest) -> AppResult<User> {
    require_admin(&request.caller)?;
    let uow = UnitOfWork::begin(db).await?;
    let model = uow.repository::<ActiveModel>().get_by_id(request.id).await?;
    let store_ids = repository::store_ids(uow.connection(), request.id).await?;
    Ok(model.into_user(store_ids))
}

/// Page of users searchable by username or full name (administrators only)
pub async fn list_page(db: &DatabaseConnection, request: ListRequest) -> AppResult<PagedResult<User>> {
    require_admin(&request.caller)?;
    let uow = UnitOfWork::begin(db).await?;
    let repo = uow.repository::<ActiveModel>();

    let mut select = repo.query();
    if let Some(term) = request.query.search_term() {
        select = select.filter(repository::matching(term));
    }
    let (items, total) = repo
        .fetch_page(select, &request.query, repository::SORTABLE)
        .await?;

    let ids: Vec<String> = items.iter().map(|m| m.id.clone()).collect();
    let mut scopes = repository::store_ids_by_user(uow.connection(), &ids).await?;
    let page = PagedResult::new(items, &request.query, total)
        .map(|m| {
            let store_ids = scopes.remove(&m.id).unwrap_or_default();
            m.into_user(store_ids)
        });
    Ok(page)
}

/// Replace a forgotten password with a generated one and mail it.
/// The new hash is kept only when the mail went out.
pub async fn recover_password(
    db: &DatabaseConnection,
    request: PasswordRecoveryRequest,
    mailer: &dyn MailSender,
) -> AppResult<()> {
    let username = required_text(&request.username, "Username")?;

    let uow = UnitOfWork::begin(db).await?;
    let mut model = match repository::get_by_username(uow.connection(), &username).await? {
        Some(model) if model.is_active => model,
        _ => {
            tracing::info!("Password recovery requested for unknown or inactive user");
            return Ok(());
        }
    };
    let Some(email) = model.email.clone() else {
        tracing::info!("Password recovery for {} skipped, no e-mail on file", model.username);
        return Ok(());
    };

    let generated = password::generate_password();
    model.password_hash = password::hash_password(&generated).map_err(security_error)?;
    let saved = uow.repository::<ActiveModel>().update(model).await?;

    let message = MailMessage {
        to: email,
        subject: "Your new club password".into(),
        body: format!(
            "Hello {},\n\nYour password has been reset. Your new password is: {}\n",
            saved.display_name(),
            generated
        ),
    };
    if let Err(e) = mailer.send(message).await {
        tracing::warn!("Recovery mail for {} failed: {:#}", saved.username, e);
        return Err(AppError::External(
            "The recovery e-mail could not be sent. Try again later".into(),
        ));
    }
    uow.commit().await?;

    tracing::info!("Password of {} reset by recovery", saved.username);
    Ok(())
}

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    let uow = UnitOfWork::begin(db).await?;
    if repository::count_users(uow.connection()).await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");
    let password_hash = password::hash_password(&auth.default_admin_password)?;
    let mut model = repository::new_model(&auth.default_admin_username, "Administrator", password_hash);
    model.is_admin = true;
    let saved = uow.repository::<ActiveModel>().insert(model).await?;
    uow.commit().await?;

    tracing::warn!("═══════════════════════════════════════════════");
    tracing::warn!("  Default admin user created!");
    tracing::warn!("  Username: {}", saved.username);
    tracing::warn!("  User ID: {}", saved.id);
    tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
    tracing::warn!("═══════════════════════════════════════════════");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mail::testing::RecordingMailSender;
    use crate::shared::test_support::{admin_caller, member_caller, test_db};
    use contracts::shared::envelope::CallerContext;
    use contracts::shared::paging::ListQuery;
    use sea_orm::{EntityTrait, PaginatorTrait};

    async fn seed_user(db: &DatabaseConnection, username: &str, password: &str, is_admin: bool) -> Uuid {
        let dto = CreateUserDto {
            username: username.into(),
            password: password.into(),
            full_name: format!("{} Full", username),
            email: Some(format!("{}@example.com", username)),
            is_admin,
            store_ids: vec![],
        };
        create(db, EntityRequest::new(admin_caller(Uuid::new_v4()), dto))
            .await
            .unwrap()
            .id
    }

    async fn stored(db: &DatabaseConnection, id: Uuid) -> repository::Model {
        repository::Entity::find_by_id(id.to_string())
            .one(db)
            .await
            .unwrap()
            .unwrap()
    }

    fn caller_for(id: Uuid, is_admin: bool) -> CallerContext {
        if is_admin {
            admin_caller(id)
        } else {
            member_caller(id, vec![])
        }
    }

    fn edit(id: Uuid, current_password: &str) -> UpdateUserDto {
        UpdateUserDto {
            id,
            full_name: "Edited".into(),
            email: None,
            is_active: true,
            is_admin: false,
            store_ids: vec![],
            current_password: current_password.into(),
            new_password: None,
        }
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_admin_creates_user() {
        let db = test_db().await;
        let dto = CreateUserDto {
            username: "Ana".into(),
            password: "x".into(),
            ..Default::default()
        };

        let user = create(&db, EntityRequest::new(admin_caller(Uuid::new_v4()), dto))
            .await
            .unwrap();
        assert!(!user.id.is_nil());
        assert!(user.updated_at.is_none());

        let model = stored(&db, user.id).await;
        assert_eq!(model.created_at, user.created_at);
        assert!(model.updated_at.is_none());
        assert_ne!(model.password_hash, "x");
        assert!(password::verify_password("x", &model.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let db = test_db().await;
        let dto = CreateUserDto {
            username: "Ana".into(),
            password: "x".into(),
            ..Default::default()
        };
        let result = create(&db, EntityRequest::new(member_caller(Uuid::new_v4(), vec![]), dto)).await;
        assert!(matches!(result, Err(AppError::Authorization(_))));
        assert_eq!(repository::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let db = test_db().await;
        seed_user(&db, "ana", "x", false).await;
        let admin = admin_caller(Uuid::new_v4());
        let attempt = |username: &str, password: &str, email: Option<&str>, store_ids: Vec<Uuid>| {
            EntityRequest::new(
                admin.clone(),
                CreateUserDto {
                    username: username.into(),
                    password: password.into(),
                    full_name: String::new(),
                    email: email.map(Into::into),
                    is_admin: false,
                    store_ids,
                },
            )
        };

        for request in [
            attempt(" ", "x", None, vec![]),
            attempt("bob", "  ", None, vec![]),
            attempt("ana", "x", None, vec![]),
            attempt("bob", "x", Some("not-an-email"), vec![]),
            attempt("bob", "x", None, vec![Uuid::new_v4()]),
        ] {
            assert!(matches!(create(&db, request).await, Err(AppError::Validation(_))));
        }
        assert_eq!(repository::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_with_store_scopes() {
        use contracts::domain::a001_store::aggregate::StoreDto;

        let db = test_db().await;
        let admin = admin_caller(Uuid::new_v4());
        let store = crate::domain::a001_store::service::create(
            &db,
            EntityRequest::new(
                admin.clone(),
                StoreDto {
                    code: "S1".into(),
                    name: "One".into(),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap();

        let dto = CreateUserDto {
            username: "clerk".into(),
            password: "x".into(),
            store_ids: vec![store.id, store.id],
            ..Default::default()
        };
        let user = create(&db, EntityRequest::new(admin.clone(), dto)).await.unwrap();
        assert_eq!(user.store_ids, vec![store.id]);

        let session = login(&db, login_request("clerk", "x")).await.unwrap();
        assert_eq!(session.permitted_stores, vec![store.id]);
    }

    #[tokio::test]
    async fn test_update_without_current_password_rejected_for_admin() {
        let db = test_db().await;
        let admin_id = seed_user(&db, "root", "rootpw", true).await;
        let target = seed_user(&db, "ana", "x", false).await;
        let before = stored(&db, target).await;

        let mut dto = edit(target, "wrong");
        dto.new_password = Some("changed".into());
        let result = update(&db, EntityRequest::new(caller_for(admin_id, true), dto)).await;
        assert!(matches!(result, Err(AppError::Authentication(_))));

        let after = stored(&db, target).await;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_own_update_with_wrong_password_keeps_hash() {
        let db = test_db().await;
        let id = seed_user(&db, "ana", "x", false).await;
        let before = stored(&db, id).await.password_hash;

        let mut dto = edit(id, "not-x");
        dto.new_password = Some("y".into());
        let result = update(&db, EntityRequest::new(caller_for(id, false), dto)).await;
        assert!(matches!(result, Err(AppError::Authentication(_))));
        assert_eq!(stored(&db, id).await.password_hash, before);
    }

    #[tokio::test]
    async fn test_own_update_changes_password_and_ignores_admin_fields() {
        let db = test_db().await;
        let id = seed_user(&db, "ana", "x", false).await;

        let mut dto = edit(id, "x");
        dto.is_admin = true;
        dto.is_active = false;
        dto.new_password = Some("y".into());
        let user = update(&db, EntityRequest::new(caller_for(id, false), dto))
            .await
            .unwrap();
        assert_eq!(user.full_name, "Edited");
        assert!(!user.is_admin);
        assert!(user.is_active);
        assert!(user.updated_at.unwrap() >= user.created_at);

        assert!(login(&db, login_request("ana", "y")).await.is_ok());
        assert!(login(&db, login_request("ana", "x")).await.is_err());
    }

    #[tokio::test]
    async fn test_update_without_new_password_keeps_hash() {
        let db = test_db().await;
        let admin_id = seed_user(&db, "root", "rootpw", true).await;
        let target = seed_user(&db, "ana", "x", false).await;
        let before = stored(&db, target).await.password_hash;

        let mut dto = edit(target, "rootpw");
        dto.new_password = Some("   ".into());
        dto.is_admin = true;
        let user = update(&db, EntityRequest::new(caller_for(admin_id, true), dto))
            .await
            .unwrap();
        assert!(user.is_admin);
        assert_eq!(stored(&db, target).await.password_hash, before);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_edit_others() {
        let db = test_db().await;
        let ana = seed_user(&db, "ana", "x", false).await;
        let bob = seed_user(&db, "bob", "y", false).await;

        let result = update(&db, EntityRequest::new(caller_for(ana, false), edit(bob, "x"))).await;
        assert!(matches!(result, Err(AppError::Authorization(_))));
    }

    #[tokio::test]
    async fn test_non_admin_delete_is_refused() {
        let db = test_db().await;
        let ana = seed_user(&db, "ana", "x", false).await;
        let bob = seed_user(&db, "bob", "y", false).await;

        let result = delete(&db, IdRequest { caller: caller_for(ana, false), id: bob }).await;
        match result {
            Err(AppError::Authorization(message)) => {
                assert!(message.contains("administrator permission"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(repository::Entity::find().count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let db = test_db().await;
        let admin_id = seed_user(&db, "root", "rootpw", true).await;
        let result = delete(&db, IdRequest { caller: caller_for(admin_id, true), id: admin_id }).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let db = test_db().await;
        let admin_id = seed_user(&db, "root", "rootpw", true).await;
        let target = seed_user(&db, "ana", "x", false).await;
        let admin = caller_for(admin_id, true);

        delete(&db, IdRequest { caller: admin.clone(), id: target }).await.unwrap();
        assert!(matches!(
            get_by_id(&db, IdRequest { caller: admin.clone(), id: target }).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete(&db, IdRequest { caller: admin, id: target }).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_login_issues_session_and_records_login() {
        let db = test_db().await;
        let id = seed_user(&db, "ana", "x", false).await;

        let session = login(&db, login_request(" ana ", "x")).await.unwrap();
        assert_eq!(session.user_id, id);
        assert_eq!(session.display_name, "ana Full");
        assert!(!session.is_admin);

        let claims = jwt::validate_token(&session.token).unwrap();
        assert_eq!(claims.sub, id.to_string());

        let model = stored(&db, id).await;
        assert!(model.last_login_at.is_some());
        assert!(model.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_login_failures_share_one_message() {
        let db = test_db().await;
        let admin_id = seed_user(&db, "root", "rootpw", true).await;
        let ana = seed_user(&db, "ana", "x", false).await;
        seed_user(&db, "bob", "y", false).await;

        let mut dto = edit(ana, "rootpw");
        dto.is_active = false;
        update(&db, EntityRequest::new(caller_for(admin_id, true), dto))
            .await
            .unwrap();

        let mut messages = Vec::new();
        for request in [
            login_request("bob", "wrong"),
            login_request("nobody", "y"),
            login_request("ana", "x"),
        ] {
            match login(&db, request).await {
                Err(AppError::Authentication(message)) => messages.push(message),
                other => panic!("unexpected outcome: {:?}", other.map(|s| s.username)),
            }
        }
        assert!(messages.iter().all(|m| m == INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_reads_are_admin_only_and_searchable() {
        let db = test_db().await;
        let admin_id = seed_user(&db, "root", "rootpw", true).await;
        let ana = seed_user(&db, "ana", "x", false).await;
        seed_user(&db, "bob", "y", false).await;

        let denied = get_by_id(&db, IdRequest { caller: caller_for(ana, false), id: ana }).await;
        assert!(matches!(denied, Err(AppError::Authorization(_))));

        let query = ListQuery {
            search: Some("bob".into()),
            ..Default::default()
        };
        let page = list_page(&db, ListRequest { caller: caller_for(admin_id, true), query })
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].username, "bob");

        let query = ListQuery {
            order_by: Some("username".into()),
            ..Default::default()
        };
        let page = list_page(&db, ListRequest { caller: caller_for(admin_id, true), query })
            .await
            .unwrap();
        let names: Vec<_> = page.items.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["ana", "bob", "root"]);
    }

    #[tokio::test]
    async fn test_recover_password_sends_new_credential() {
        let db = test_db().await;
        seed_user(&db, "ana", "x", false).await;
        let mailer = RecordingMailSender::default();

        recover_password(&db, PasswordRecoveryRequest { username: "ana".into() }, &mailer)
            .await
            .unwrap();

        let sent = mailer.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ana@example.com");
        let generated = sent[0]
            .body
            .rsplit(": ")
            .next()
            .unwrap()
            .trim()
            .to_string();

        assert!(login(&db, login_request("ana", "x")).await.is_err());
        assert!(login(&db, login_request("ana", &generated)).await.is_ok());
    }

    #[tokio::test]
    async fn test_recover_password_rolls_back_when_mail_fails() {
        let db = test_db().await;
        let id = seed_user(&db, "ana", "x", false).await;
        let before = stored(&db, id).await;

        let result = recover_password(
            &db,
            PasswordRecoveryRequest { username: "ana".into() },
            &RecordingMailSender::failing(),
        )
        .await;
        assert!(matches!(result, Err(AppError::External(_))));
        assert_eq!(stored(&db, id).await, before);
    }

    #[tokio::test]
    async fn test_recover_password_does_not_reveal_accounts() {
        let db = test_db().await;
        let dto = CreateUserDto {
            username: "nomail".into(),
            password: "x".into(),
            ..Default::default()
        };
        create(&db, EntityRequest::new(admin_caller(Uuid::new_v4()), dto))
            .await
            .unwrap();
        let mailer = RecordingMailSender::default();

        for username in ["ghost", "nomail"] {
            let request = PasswordRecoveryRequest { username: username.into() };
            assert!(recover_password(&db, request, &mailer).await.is_ok());
        }
        assert!(mailer.messages().is_empty());
    }

    #[tokio::test]
    async fn test_default_admin_created_once() {
        let db = test_db().await;
        let auth = AuthConfig::default();

        ensure_admin_user_exists(&db, &auth).await.unwrap();
        ensure_admin_user_exists(&db, &auth).await.unwrap();
        assert_eq!(repository::Entity::find().count(&db).await.unwrap(), 1);

        let session = login(&db, login_request(&auth.default_admin_username, &auth.default_admin_password))
            .await
            .unwrap();
        assert!(session.is_admin);
        assert_eq!(session.display_name, "Administrator");
    }
}
