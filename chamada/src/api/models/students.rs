//! API response model for students.

use crate::db::models::students::StudentDBResponse;
use crate::types::StudentId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A student on the roster.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: StudentId,
    #[schema(example = "Ana Silva")]
    pub nome: String,
    #[schema(example = "123456789")]
    pub telefone: Option<String>,
    /// Shift the student attends (e.g. "Manhã", "Tarde")
    #[schema(example = "Manhã")]
    pub turno: Option<String>,
    /// School transport line
    #[schema(example = "Onibus Branco")]
    pub transporte: Option<String>,
}

impl From<StudentDBResponse> for StudentResponse {
    fn from(db: StudentDBResponse) -> Self {
        Self {
            id: db.id,
            nome: db.nome,
            telefone: db.telefone,
            turno: db.turno,
            transporte: db.transporte,
        }
    }
}
