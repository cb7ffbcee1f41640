//! Database models for attendance records.

use crate::types::StudentId;
use sqlx::FromRow;

/// `presenca` projected to (aluno_id, data, status).
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceDBResponse {
    pub aluno_id: StudentId,
    pub data: String,
    pub status: String,
}

/// One (student, status) pair of a day's call.
///
/// Both fields stay optional: missing values go to the database as NULL and are rejected there.
#[derive(Debug, Clone)]
pub struct CallEntryDBRequest {
    pub aluno_id: Option<StudentId>,
    pub status: Option<String>,
}

/// A full day's call, written with one upsert.
#[derive(Debug, Clone)]
pub struct AttendanceUpsertDBRequest {
    pub data: String,
    pub chamadas: Vec<CallEntryDBRequest>,
}
