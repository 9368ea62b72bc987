//! Activity/audit seam.
//!
//! Every successful category mutation is reported to an [`ActivityRecorder`].
//! The report is a side-channel: it happens after the store commit and its
//! failure never rolls the mutation back.

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::types::{CategoryId, UserId};

/// Action names reported to the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityAction {
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
}

impl ActivityAction {
    /// Wire name used by the audit trail.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateCategory => "CREATE_CATEGORY",
            Self::UpdateCategory => "UPDATE_CATEGORY",
            Self::DeleteCategory => "DELETE_CATEGORY",
        }
    }
}

/// A single audit record.
///
/// Moves are reported as `UPDATE_CATEGORY` with a
/// `{"action": "move", "new_parent_id": …}` detail payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub action: ActivityAction,
    pub category_id: CategoryId,
    pub user_id: UserId,
    pub details: Option<Value>,
    pub recorded_at: NaiveDateTime,
}

impl ActivityEntry {
    pub fn new(
        action: ActivityAction,
        category_id: CategoryId,
        user_id: UserId,
        details: Option<Value>,
    ) -> Self {
        Self {
            action,
            category_id,
            user_id,
            details,
            recorded_at: Utc::now().naive_utc(),
        }
    }
}

/// Collaborator receiving audit records for successful mutations.
pub trait ActivityRecorder {
    fn record(&self, entry: ActivityEntry);
}

/// Recorder that writes audit records to the application log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogActivityRecorder;

impl ActivityRecorder for LogActivityRecorder {
    fn record(&self, entry: ActivityEntry) {
        match &entry.details {
            Some(details) => log::info!(
                "{} category={} user={} details={details}",
                entry.action.as_str(),
                entry.category_id,
                entry.user_id,
            ),
            None => log::info!(
                "{} category={} user={}",
                entry.action.as_str(),
                entry.category_id,
                entry.user_id,
            ),
        }
    }
}
