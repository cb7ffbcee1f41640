//! API request/response models for attendance.

use crate::db::models::attendance::{AttendanceDBResponse, CallEntryDBRequest};
use crate::types::StudentId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One day's call.
///
/// Both fields are optional at the JSON level so that a missing `data` or `chamadas` is reported
/// with the API's own validation message rather than a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSubmission {
    /// Day of the call as a canonical `YYYY-MM-DD` date
    #[schema(example = "2024-05-01")]
    pub data: Option<String>,
    /// Status per student; students left out keep their existing record for the day
    pub chamadas: Option<Vec<CallEntry>>,
}

/// One student's status within a call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallEntry {
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_id")]
    pub aluno_id: Option<StudentId>,
    #[schema(example = "presente")]
    pub status: Option<String>,
}

impl From<CallEntry> for CallEntryDBRequest {
    fn from(entry: CallEntry) -> Self {
        Self {
            aluno_id: entry.aluno_id,
            status: entry.status,
        }
    }
}

/// A stored attendance record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecordResponse {
    pub aluno_id: StudentId,
    #[schema(example = "2024-05-01")]
    pub data: String,
    #[schema(example = "presente")]
    pub status: String,
}

impl From<AttendanceDBResponse> for AttendanceRecordResponse {
    fn from(db: AttendanceDBResponse) -> Self {
        Self {
            aluno_id: db.aluno_id,
            data: db.data,
            status: db.status,
        }
    }
}
