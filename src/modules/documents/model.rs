use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Document lifecycle. The only legal walk is
/// pending -> issued -> delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Issued,
    Delivered,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Issued => "issued",
            DocumentStatus::Delivered => "delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DocumentStatus::Pending),
            "issued" => Some(DocumentStatus::Issued),
            "delivered" => Some(DocumentStatus::Delivered),
            _ => None,
        }
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        matches!(
            (self, next),
            (DocumentStatus::Pending, DocumentStatus::Issued)
                | (DocumentStatus::Issued, DocumentStatus::Delivered)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Document {
    pub id: Uuid,
    pub student_id: Uuid,
    pub kind: String,
    pub status: String,
    pub file_path: Option<String>,
    pub requested_on: chrono::NaiveDate,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDocumentDto {
    pub student_id: Uuid,
    #[validate(length(min = 1))]
    pub kind: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DocumentListParams {
    pub status: Option<String>,
    pub student_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_forward_transitions_are_legal() {
        use DocumentStatus::*;

        assert!(Pending.can_transition_to(Issued));
        assert!(Issued.can_transition_to(Delivered));

        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Issued.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Issued));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn parse_round_trips() {
        for status in [
            DocumentStatus::Pending,
            DocumentStatus::Issued,
            DocumentStatus::Delivered,
        ] {
            assert_eq!(DocumentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DocumentStatus::parse("archived"), None);
    }
}
