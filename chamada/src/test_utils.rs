//! Test utilities: application construction and fixture rows.

use crate::config::Config;
use crate::types::{ActivityId, StudentId, TeacherId};
use axum_test::TestServer;
use sqlx::SqlitePool;

pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    create_test_app_with_config(pool, create_test_config()).await
}

pub async fn create_test_app_with_config(pool: SqlitePool, config: Config) -> TestServer {
    let app = crate::Application::new_with_pool(config, pool)
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    }
}

pub async fn insert_student(pool: &SqlitePool, nome: &str) -> StudentId {
    sqlx::query_scalar("INSERT INTO alunos (nome, turno) VALUES (?, 'Manhã') RETURNING id")
        .bind(nome)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test student")
}

pub async fn insert_teacher(pool: &SqlitePool, nome: &str) -> TeacherId {
    sqlx::query_scalar("INSERT INTO professores (nome) VALUES (?) RETURNING id")
        .bind(nome)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test teacher")
}

pub async fn insert_activity(pool: &SqlitePool, nome: &str, idprofessor: TeacherId) -> ActivityId {
    sqlx::query_scalar("INSERT INTO atividades (nome, idprofessor) VALUES (?, ?) RETURNING idatividades")
        .bind(nome)
        .bind(idprofessor)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test activity")
}
