use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Loyalty club member registered at a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub store_id: Uuid,
    pub full_name: String,
    /// National document number, unique per store
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub points_balance: i64,
    pub membership_expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/edit payload; `id` is None on create
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: Option<Uuid>,
    pub store_id: Uuid,
    pub full_name: String,
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub membership_expires_at: Option<DateTime<Utc>>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Signed change to a member's points balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsAdjustmentDto {
    /// Taken from the route when posted to a member
    #[serde(default)]
    pub member_id: Uuid,
    pub delta: i64,
    pub reason: Option<String>,
}
