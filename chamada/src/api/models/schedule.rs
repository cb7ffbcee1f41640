//! API response model for the schedule view (`grade`).

use crate::db::models::enrollments::ScheduleEntryDBResponse;
use crate::types::{ActivityId, StudentId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One enrollment flattened with its student, activity and teacher names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleEntryResponse {
    pub idaluno: StudentId,
    #[schema(example = "Ana Silva")]
    pub nome_aluno: String,
    pub id_atividade: ActivityId,
    #[schema(example = "Futebol")]
    pub nome_atividade: String,
    #[schema(example = "Manhã")]
    pub turno: Option<String>,
    #[schema(example = "08:00")]
    pub horario: Option<String>,
    #[schema(example = "Segunda")]
    pub dia_semana: Option<String>,
    pub nome_professor: String,
}

impl From<ScheduleEntryDBResponse> for ScheduleEntryResponse {
    fn from(db: ScheduleEntryDBResponse) -> Self {
        Self {
            idaluno: db.idaluno,
            nome_aluno: db.nome_aluno,
            id_atividade: db.id_atividade,
            nome_atividade: db.nome_atividade,
            turno: db.turno,
            horario: db.horario,
            dia_semana: db.dia_semana,
            nome_professor: db.nome_professor,
        }
    }
}
