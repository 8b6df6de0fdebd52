use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Club-wide totals restricted to the stores the caller may see
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubSummary {
    pub total_members: u64,
    pub active_members: u64,
    pub expired_memberships: u64,
    pub total_points: i64,
    pub stores: Vec<StoreSummary>,
}

/// Per-store line of the club summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub store_id: Uuid,
    pub store_code: String,
    pub store_name: String,
    pub members: u64,
    pub active_members: u64,
    pub points: i64,
}
