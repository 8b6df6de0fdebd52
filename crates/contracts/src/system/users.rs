use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    /// Stores the user may act within
    pub store_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub store_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserDto {
    #[serde(default)]
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    #[serde(default)]
    pub store_ids: Vec<Uuid>,
    /// Password of the caller, re-confirmed before any change is accepted
    pub current_password: String,
    /// None keeps the stored password
    pub new_password: Option<String>,
}
