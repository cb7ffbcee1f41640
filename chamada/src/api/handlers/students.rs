use crate::AppState;
use crate::api::models::students::StudentResponse;
use crate::db::handlers::Students;
use crate::errors::{Error, Result};
use axum::{Json, extract::State};
use tracing::info;

const LIST_STUDENTS_ERROR: &str = "Erro ao buscar alunos";

#[utoipa::path(
    get,
    path = "/api/alunos",
    tag = "alunos",
    summary = "List students",
    responses(
        (status = 200, description = "Every student on the roster", body = Vec<StudentResponse>),
        (status = 500, description = "Storage error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<StudentResponse>>> {
    info!("Buscando alunos");

    let mut conn = state.db.acquire().await.map_err(|e| Error::storage(LIST_STUDENTS_ERROR, e))?;
    let students = Students::new(&mut conn)
        .list()
        .await
        .map_err(|e| Error::storage(LIST_STUDENTS_ERROR, e))?;

    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use crate::api::models::students::StudentResponse;
    use crate::db::schema::DEFAULT_ROSTER;
    use crate::errors::ErrorBody;
    use crate::test_utils::*;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_students_empty(pool: SqlitePool) {
        let server = create_test_app(pool).await;

        let response = server.get("/api/alunos").await;
        response.assert_status_ok();
        let students: Vec<StudentResponse> = response.json();
        assert!(students.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_seeded_students(pool: SqlitePool) {
        let mut config = create_test_config();
        config.seed_students = true;
        let server = create_test_app_with_config(pool, config).await;

        let response = server.get("/api/alunos").await;
        response.assert_status_ok();
        let students: Vec<StudentResponse> = response.json();
        assert_eq!(students.len(), DEFAULT_ROSTER.len());
        assert_eq!(students[0].nome, "Ana Silva");
        assert_eq!(students[1].transporte.as_deref(), Some("Onibus Amarelo"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_students_storage_error(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        sqlx::query("DROP TABLE presenca").execute(&pool).await.unwrap();
        sqlx::query("DROP TABLE alunos").execute(&pool).await.unwrap();

        let response = server.get("/api/alunos").await;
        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = response.json();
        assert!(body.error.starts_with("Erro ao buscar alunos: "), "unexpected body: {}", body.error);
        assert!(body.error.contains("no such table"));
    }
}
