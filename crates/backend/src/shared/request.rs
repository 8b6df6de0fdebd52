use contracts::shared::envelope::CallerContext;
use uuid::Uuid;

use super::error::{AppError, AppResult};

pub const ADMIN_REQUIRED: &str = "This operation requires administrator permission";
pub const STORE_OUT_OF_SCOPE: &str = "You do not have permission to act on this store";

pub fn require_admin(caller: &CallerContext) -> AppResult<()> {
    if caller.is_admin {
        Ok(())
    } else {
        Err(AppError::Authorization(ADMIN_REQUIRED.into()))
    }
}

pub fn require_store(caller: &CallerContext, store_id: Uuid) -> AppResult<()> {
    if caller.can_access_store(store_id) {
        Ok(())
    } else {
        Err(AppError::Authorization(STORE_OUT_OF_SCOPE.into()))
    }
}

/// Identifier taken from a route segment
pub fn parse_path_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::validation(format!("Invalid id: {}", raw)))
}

/// Unwraps the payload of an entity request
pub fn require_entity<T>(entity: Option<T>) -> AppResult<T> {
    entity.ok_or_else(|| AppError::validation("The request carries no data"))
}

/// Trimmed value of a mandatory text field
pub fn required_text(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text becomes None
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Basic e-mail shape check, blank is allowed
pub fn check_email(email: &Option<String>) -> AppResult<()> {
    match email {
        Some(email) if !email.contains('@') => Err(AppError::validation("Invalid email format")),
        _ => Ok(()),
    }
}
