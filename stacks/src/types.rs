use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stack statuses a listing call is filtered to.
///
/// In-progress and fully deleted stacks never reach this tool; only stacks
/// in a terminal or failed-but-visible state are candidates for expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StackStatus {
    CreateFailed,
    CreateComplete,
    RollbackFailed,
    RollbackComplete,
    DeleteFailed,
    UpdateComplete,
    UpdateFailed,
    UpdateRollbackFailed,
    UpdateRollbackComplete,
    ImportComplete,
    ImportRollbackFailed,
    ImportRollbackComplete,
}

impl StackStatus {
    pub const ALL: [StackStatus; 12] = [
        StackStatus::CreateFailed,
        StackStatus::CreateComplete,
        StackStatus::RollbackFailed,
        StackStatus::RollbackComplete,
        StackStatus::DeleteFailed,
        StackStatus::UpdateComplete,
        StackStatus::UpdateFailed,
        StackStatus::UpdateRollbackFailed,
        StackStatus::UpdateRollbackComplete,
        StackStatus::ImportComplete,
        StackStatus::ImportRollbackFailed,
        StackStatus::ImportRollbackComplete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StackStatus::CreateFailed => "CREATE_FAILED",
            StackStatus::CreateComplete => "CREATE_COMPLETE",
            StackStatus::RollbackFailed => "ROLLBACK_FAILED",
            StackStatus::RollbackComplete => "ROLLBACK_COMPLETE",
            StackStatus::DeleteFailed => "DELETE_FAILED",
            StackStatus::UpdateComplete => "UPDATE_COMPLETE",
            StackStatus::UpdateFailed => "UPDATE_FAILED",
            StackStatus::UpdateRollbackFailed => "UPDATE_ROLLBACK_FAILED",
            StackStatus::UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
            StackStatus::ImportComplete => "IMPORT_COMPLETE",
            StackStatus::ImportRollbackFailed => "IMPORT_ROLLBACK_FAILED",
            StackStatus::ImportRollbackComplete => "IMPORT_ROLLBACK_COMPLETE",
        }
    }
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StackStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unsupported stack status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DriftInformation {
    pub stack_drift_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::timestamp::option")]
    pub last_check_timestamp: Option<DateTime<Utc>>,
}

/// A stack as returned by the listing API.
///
/// Field names serialize with the provider's PascalCase keys so the JSON
/// report reads like the API response it came from; timestamps use the
/// format in [`crate::timestamp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    pub stack_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::timestamp::option")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::timestamp::option")]
    pub last_updated_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::timestamp::option")]
    pub deletion_time: Option<DateTime<Utc>>,
    pub stack_status: StackStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_status_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_information: Option<DriftInformation>,
}

impl StackSummary {
    pub fn new(stack_name: impl Into<String>, stack_status: StackStatus) -> Self {
        Self {
            stack_id: None,
            stack_name: stack_name.into(),
            template_description: None,
            creation_time: None,
            last_updated_time: None,
            deletion_time: None,
            stack_status,
            stack_status_reason: None,
            parent_id: None,
            root_id: None,
            drift_information: None,
        }
    }

    pub fn with_stack_id(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = Some(stack_id.into());
        self
    }

    pub fn with_creation_time(mut self, creation_time: DateTime<Utc>) -> Self {
        self.creation_time = Some(creation_time);
        self
    }

    pub fn with_last_updated_time(mut self, last_updated_time: DateTime<Utc>) -> Self {
        self.last_updated_time = Some(last_updated_time);
        self
    }

    /// Timestamp the stack's age is measured from: last update, falling back
    /// to creation.
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.last_updated_time.or(self.creation_time)
    }
}

/// One page of a paginated listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackPage {
    pub summaries: Vec<StackSummary>,
    pub next_token: Option<String>,
}

impl StackPage {
    pub fn new(summaries: Vec<StackSummary>) -> Self {
        Self {
            summaries,
            next_token: None,
        }
    }

    pub fn with_next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_round_trip_through_provider_spelling() {
        for status in StackStatus::ALL {
            assert_eq!(status.as_str().parse::<StackStatus>(), Ok(status));
        }
        assert!("CREATE_IN_PROGRESS".parse::<StackStatus>().is_err());
        assert!("DELETE_COMPLETE".parse::<StackStatus>().is_err());
    }

    #[test]
    fn test_reference_time_prefers_last_update() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let stack = StackSummary::new("dev-api", StackStatus::CreateComplete)
            .with_creation_time(created);
        assert_eq!(stack.reference_time(), Some(created));

        let stack = stack.with_last_updated_time(updated);
        assert_eq!(stack.reference_time(), Some(updated));

        let stack = StackSummary::new("dev-api", StackStatus::CreateComplete);
        assert_eq!(stack.reference_time(), None);
    }

    #[test]
    fn test_serialization_uses_provider_keys() {
        let stack = StackSummary::new("dev-api", StackStatus::UpdateRollbackComplete)
            .with_creation_time(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let value = serde_json::to_value(&stack).unwrap();

        assert_eq!(value["StackName"], "dev-api");
        assert_eq!(value["StackStatus"], "UPDATE_ROLLBACK_COMPLETE");
        assert_eq!(value["CreationTime"], "2024-01-01 00:00:00+00:00");
        assert!(value.get("LastUpdatedTime").is_none());
        assert!(value.get("StackId").is_none());
    }

    #[test]
    fn test_page_builder() {
        let page = StackPage::new(vec![StackSummary::new("a", StackStatus::CreateFailed)])
            .with_next_token("token-1");
        assert_eq!(page.summaries.len(), 1);
        assert_eq!(page.next_token.as_deref(), Some("token-1"));
    }
}
