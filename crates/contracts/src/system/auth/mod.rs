use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session data handed to the client after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub is_admin: bool,
    pub permitted_stores: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRecoveryRequest {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub username: String,
    pub display_name: String,
    pub is_admin: bool,
    #[serde(default)]
    pub stores: Vec<Uuid>,
    pub jti: String, // token id
    pub exp: usize,  // expiration timestamp
    pub iat: usize,  // issued at
}
