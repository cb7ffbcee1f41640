//! API request/response models for enrollments (`matricula`).

use crate::db::models::enrollments::{EnrollmentDetailDBResponse, EnrollmentUpdateDBRequest};
use crate::types::{ActivityId, EnrollmentId, Provided, StudentId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for enrolling a student. Every field is required and must be truthy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentCreate {
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_id")]
    pub idaluno: Option<StudentId>,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_id")]
    pub idatividades: Option<ActivityId>,
    #[schema(example = "Manhã")]
    pub turno: Option<String>,
    #[schema(example = "08:00")]
    pub horario: Option<String>,
    #[schema(example = "Segunda")]
    pub dia_semana: Option<String>,
}

/// Request body for updating an enrollment. All fields are optional;
/// only provided (truthy) fields are updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentUpdate {
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_id")]
    pub idatividades: Option<ActivityId>,
    #[schema(example = "Tarde")]
    pub turno: Option<String>,
    #[schema(example = "14:00")]
    pub horario: Option<String>,
    #[schema(example = "Quarta")]
    pub dia_semana: Option<String>,
}

impl EnrollmentUpdate {
    pub fn has_changes(&self) -> bool {
        self.idatividades.is_provided() || self.turno.is_provided() || self.horario.is_provided() || self.dia_semana.is_provided()
    }
}

// Falsy values (0, "") are dropped here, so they never overwrite a column
impl From<EnrollmentUpdate> for EnrollmentUpdateDBRequest {
    fn from(update: EnrollmentUpdate) -> Self {
        Self {
            idatividades: update.idatividades.filter(|v| *v != 0),
            turno: update.turno.filter(|s| !s.is_empty()),
            horario: update.horario.filter(|s| !s.is_empty()),
            dia_semana: update.dia_semana.filter(|s| !s.is_empty()),
        }
    }
}

/// A student's enrollment with activity and teacher names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub idmatricula: EnrollmentId,
    pub idaluno: StudentId,
    pub idatividades: ActivityId,
    #[schema(example = "Futebol")]
    pub nome_atividade: String,
    #[schema(example = "Marcos Prado")]
    pub nome_professor: String,
    pub turno: Option<String>,
    pub horario: Option<String>,
    pub dia_semana: Option<String>,
}

impl From<EnrollmentDetailDBResponse> for EnrollmentResponse {
    fn from(db: EnrollmentDetailDBResponse) -> Self {
        Self {
            idmatricula: db.idmatricula,
            idaluno: db.idaluno,
            idatividades: db.idatividades,
            nome_atividade: db.nome_atividade,
            nome_professor: db.nome_professor,
            turno: db.turno,
            horario: db.horario,
            dia_semana: db.dia_semana,
        }
    }
}

/// Returned by a successful enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentCreated {
    pub idmatricula: EnrollmentId,
    #[schema(example = "Aluno matriculado com sucesso!")]
    pub message: String,
}
