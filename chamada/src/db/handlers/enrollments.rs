//! Database repository for enrollments (`matricula`) and the joined schedule views.

use crate::db::{
    errors::{DbError, Result},
    models::enrollments::{
        EnrollmentCreateDBRequest, EnrollmentDBResponse, EnrollmentDetailDBResponse, EnrollmentUpdateDBRequest,
        ScheduleEntryDBResponse,
    },
};
use crate::types::{EnrollmentId, StudentId};
use sqlx::SqliteConnection;
use tracing::instrument;

const ENROLLMENT_COLUMNS: &str = "idmatricula, idaluno, idatividades, turno, horario, dia_semana, status";

pub struct Enrollments<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Enrollments<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(idaluno = request.idaluno, idatividades = request.idatividades), err)]
    pub async fn create(&mut self, request: &EnrollmentCreateDBRequest) -> Result<EnrollmentDBResponse> {
        // No duplicate check: the same student may hold several identical enrollments
        let enrollment = sqlx::query_as::<_, EnrollmentDBResponse>(&format!(
            "INSERT INTO matricula (idaluno, idatividades, turno, horario, dia_semana) VALUES (?, ?, ?, ?, ?) RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(request.idaluno)
        .bind(request.idatividades)
        .bind(&request.turno)
        .bind(&request.horario)
        .bind(&request.dia_semana)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(enrollment)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: EnrollmentId) -> Result<Option<EnrollmentDBResponse>> {
        let enrollment = sqlx::query_as::<_, EnrollmentDBResponse>(&format!("SELECT {ENROLLMENT_COLUMNS} FROM matricula WHERE idmatricula = ?"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(enrollment)
    }

    /// Returns whether a row was removed.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, id: EnrollmentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM matricula WHERE idmatricula = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrites only the fields set in `request`; [`DbError::NotFound`] when no row matches.
    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, id: EnrollmentId, request: &EnrollmentUpdateDBRequest) -> Result<EnrollmentDBResponse> {
        // Atomic update with conditional field updates
        let enrollment = sqlx::query_as::<_, EnrollmentDBResponse>(&format!(
            r#"
            UPDATE matricula SET
                idatividades = COALESCE(?, idatividades),
                turno = COALESCE(?, turno),
                horario = COALESCE(?, horario),
                dia_semana = COALESCE(?, dia_semana)
            WHERE idmatricula = ?
            RETURNING {ENROLLMENT_COLUMNS}
            "#
        ))
        .bind(request.idatividades)
        .bind(&request.turno)
        .bind(&request.horario)
        .bind(&request.dia_semana)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(enrollment)
    }

    /// A student's enrollments with activity and teacher names.
    ///
    /// Enrollments whose activity or teacher row is missing are left out by the inner joins.
    #[instrument(skip(self), err)]
    pub async fn list_for_student(&mut self, idaluno: StudentId) -> Result<Vec<EnrollmentDetailDBResponse>> {
        let enrollments = sqlx::query_as::<_, EnrollmentDetailDBResponse>(
            r#"
            SELECT
                m.idmatricula,
                m.idaluno,
                m.idatividades,
                atv.nome AS nome_atividade,
                p.nome AS nome_professor,
                m.turno,
                m.horario,
                m.dia_semana
            FROM matricula AS m
            JOIN atividades AS atv ON m.idatividades = atv.idatividades
            JOIN professores AS p ON atv.idprofessor = p.id
            WHERE m.idaluno = ?
            ORDER BY m.idmatricula
            "#,
        )
        .bind(idaluno)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(enrollments)
    }

    /// The full schedule: every enrollment joined with its student, activity and teacher.
    #[instrument(skip(self), err)]
    pub async fn schedule(&mut self) -> Result<Vec<ScheduleEntryDBResponse>> {
        let entries = sqlx::query_as::<_, ScheduleEntryDBResponse>(
            r#"
            SELECT
                m.idaluno,
                a.nome AS nome_aluno,
                m.idatividades AS id_atividade,
                atv.nome AS nome_atividade,
                m.turno,
                m.horario,
                m.dia_semana,
                p.nome AS nome_professor
            FROM matricula AS m
            JOIN alunos AS a ON m.idaluno = a.id
            JOIN atividades AS atv ON m.idatividades = atv.idatividades
            JOIN professores AS p ON atv.idprofessor = p.id
            ORDER BY m.idmatricula
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        tracing::debug!("Database layer: Retrieved {} schedule entries", entries.len());

        Ok(entries)
    }
}
