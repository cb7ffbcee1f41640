use crate::AppState;
use crate::api::models::schedule::ScheduleEntryResponse;
use crate::db::handlers::Enrollments;
use crate::errors::{Error, Result};
use axum::{Json, extract::State};
use tracing::info;

const SCHEDULE_ERROR: &str = "Erro ao buscar a grade de horários";

/// Enrollments whose student, activity or teacher no longer exists are not listed.
#[utoipa::path(
    get,
    path = "/api/grade",
    tag = "grade",
    summary = "Get the schedule",
    responses(
        (status = 200, description = "Every enrollment with student, activity and teacher names", body = Vec<ScheduleEntryResponse>),
        (status = 500, description = "Storage error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_schedule(State(state): State<AppState>) -> Result<Json<Vec<ScheduleEntryResponse>>> {
    info!("Buscando grade de horários");

    let mut conn = state.db.acquire().await.map_err(|e| Error::storage(SCHEDULE_ERROR, e))?;
    let entries = Enrollments::new(&mut conn)
        .schedule()
        .await
        .map_err(|e| Error::storage(SCHEDULE_ERROR, e))?;

    Ok(Json(entries.into_iter().map(ScheduleEntryResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use crate::api::models::schedule::ScheduleEntryResponse;
    use crate::test_utils::*;
    use serde_json::json;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_schedule_flattens_joined_rows(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let ana = insert_student(&pool, "Ana Silva").await;
        let bruno = insert_student(&pool, "Bruno Costa").await;
        let professora = insert_teacher(&pool, "Júlia Alves").await;
        let danca = insert_activity(&pool, "Dança", professora).await;

        for (idaluno, dia) in [(ana, "Segunda"), (bruno, "Terça")] {
            server
                .post("/api/matriculas")
                .json(&json!({
                    "idaluno": idaluno,
                    "idatividades": danca,
                    "turno": "Tarde",
                    "horario": "15:00",
                    "dia_semana": dia
                }))
                .await
                .assert_status(axum::http::StatusCode::CREATED);
        }

        let response = server.get("/api/grade").await;
        response.assert_status_ok();
        let schedule: Vec<ScheduleEntryResponse> = response.json();
        assert_eq!(schedule.len(), 2);

        let entry = schedule.iter().find(|e| e.idaluno == bruno).expect("Bruno should be scheduled");
        assert_eq!(entry.nome_aluno, "Bruno Costa");
        assert_eq!(entry.id_atividade, danca);
        assert_eq!(entry.nome_atividade, "Dança");
        assert_eq!(entry.nome_professor, "Júlia Alves");
        assert_eq!(entry.dia_semana.as_deref(), Some("Terça"));
        assert_eq!(entry.horario.as_deref(), Some("15:00"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_schedule_skips_enrollments_without_teacher(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let ana = insert_student(&pool, "Ana Silva").await;
        let orphan: i64 = sqlx::query_scalar("INSERT INTO atividades (nome, idprofessor) VALUES ('Xadrez', NULL) RETURNING idatividades")
            .fetch_one(&pool)
            .await
            .unwrap();

        server
            .post("/api/matriculas")
            .json(&json!({
                "idaluno": ana,
                "idatividades": orphan,
                "turno": "Manhã",
                "horario": "09:00",
                "dia_semana": "Sexta"
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = server.get("/api/grade").await;
        response.assert_status_ok();
        let schedule: Vec<ScheduleEntryResponse> = response.json();
        assert!(schedule.is_empty());
    }
}
