use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store (branch) of the club; the unit of authorization scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub city: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/edit payload; `id` is None on create
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDto {
    pub id: Option<Uuid>,
    pub code: String,
    pub name: String,
    pub city: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}
