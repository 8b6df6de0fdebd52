use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::paging::ListQuery;

// ============================================================================
// Request envelopes
// ============================================================================

/// Identity and authorization context of the caller, rebuilt from the session
/// token on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    /// Raw session token the request was authenticated with
    pub token: String,
    pub user_id: Uuid,
    pub is_admin: bool,
    /// Stores the caller may act within
    pub permitted_stores: Vec<Uuid>,
}

impl CallerContext {
    /// Administrators act on every store, everyone else only on their scopes
    pub fn can_access_store(&self, store_id: Uuid) -> bool {
        self.is_admin || self.permitted_stores.contains(&store_id)
    }
}

/// Request carrying an optional entity payload (create/edit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRequest<T> {
    pub caller: CallerContext,
    pub entity: Option<T>,
}

impl<T> EntityRequest<T> {
    pub fn new(caller: CallerContext, entity: T) -> Self {
        Self {
            caller,
            entity: Some(entity),
        }
    }
}

/// Request addressing a single record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdRequest {
    pub caller: CallerContext,
    pub id: Uuid,
}

/// Request for a filtered page of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequest {
    pub caller: CallerContext,
    pub query: ListQuery,
}

// ============================================================================
// Result envelope
// ============================================================================

/// Category of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Persistence,
    Authorization,
    Authentication,
    External,
}

/// Outcome of a business operation as seen by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> ResultEnvelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            error_kind: None,
            payload: Some(payload),
        }
    }

    /// Successful outcome with an informational message
    pub fn info(payload: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error_kind: None,
            payload: Some(payload),
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error_kind: Some(kind),
            payload: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(is_admin: bool, stores: Vec<Uuid>) -> CallerContext {
        CallerContext {
            token: "t".into(),
            user_id: Uuid::new_v4(),
            is_admin,
            permitted_stores: stores,
        }
    }

    #[test]
    fn test_store_access_by_scope() {
        let store = Uuid::new_v4();
        assert!(caller(true, vec![]).can_access_store(store));
        assert!(caller(false, vec![store]).can_access_store(store));
        assert!(!caller(false, vec![Uuid::new_v4()]).can_access_store(store));
    }

    #[test]
    fn test_failure_envelope_serializes_without_payload() {
        let envelope: ResultEnvelope<String> =
            ResultEnvelope::failure(ErrorKind::NotFound, "Record not found");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error_kind"], "not_found");
        assert_eq!(json["message"], "Record not found");
        assert!(json.get("payload").is_none());
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Ticket {
        number: u32,
    }

    #[test]
    fn test_envelope_decodes_payload_without_default() {
        let ok: ResultEnvelope<Ticket> =
            serde_json::from_str(r#"{"success":true,"payload":{"number":7}}"#).unwrap();
        assert_eq!(ok.payload, Some(Ticket { number: 7 }));

        let failed: ResultEnvelope<Ticket> = serde_json::from_str(
            r#"{"success":false,"error_kind":"not_found","message":"Record not found"}"#,
        )
        .unwrap();
        assert!(failed.payload.is_none());
        assert_eq!(failed.error_kind, Some(ErrorKind::NotFound));
    }
}
