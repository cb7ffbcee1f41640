//! Database models for students.

use crate::types::StudentId;
use sqlx::FromRow;

/// One row of `alunos`.
#[derive(Debug, Clone, FromRow)]
pub struct StudentDBResponse {
    pub id: StudentId,
    pub nome: String,
    pub telefone: Option<String>,
    pub turno: Option<String>,
    pub transporte: Option<String>,
}
