//! Database models for enrollments (`matricula`) and the schedule view.

use crate::types::{ActivityId, EnrollmentId, StudentId};
use sqlx::FromRow;

/// Request for inserting an enrollment. Validation happens at the API layer.
#[derive(Debug, Clone)]
pub struct EnrollmentCreateDBRequest {
    pub idaluno: StudentId,
    pub idatividades: ActivityId,
    pub turno: String,
    pub horario: String,
    pub dia_semana: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentUpdateDBRequest {
    pub idatividades: Option<ActivityId>,
    pub turno: Option<String>,
    pub horario: Option<String>,
    pub dia_semana: Option<String>,
}

/// A raw `matricula` row.
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentDBResponse {
    pub idmatricula: EnrollmentId,
    pub idaluno: Option<StudentId>,
    pub idatividades: Option<ActivityId>,
    pub turno: Option<String>,
    pub horario: Option<String>,
    pub dia_semana: Option<String>,
    pub status: Option<String>,
}

/// An enrollment joined with its activity and teacher names.
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentDetailDBResponse {
    pub idmatricula: EnrollmentId,
    pub idaluno: StudentId,
    pub idatividades: ActivityId,
    pub nome_atividade: String,
    pub nome_professor: String,
    pub turno: Option<String>,
    pub horario: Option<String>,
    pub dia_semana: Option<String>,
}

/// One row of the schedule view (enrollment × student × activity × teacher).
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleEntryDBResponse {
    pub idaluno: StudentId,
    pub nome_aluno: String,
    pub id_atividade: ActivityId,
    pub nome_atividade: String,
    pub turno: Option<String>,
    pub horario: Option<String>,
    pub dia_semana: Option<String>,
    pub nome_professor: String,
}
