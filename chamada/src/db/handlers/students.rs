//! Database repository for the student roster.

use crate::db::{errors::Result, models::students::StudentDBResponse};
use sqlx::SqliteConnection;
use tracing::instrument;

pub struct Students<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Students<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Every student, ordered by id.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<StudentDBResponse>> {
        let students = sqlx::query_as::<_, StudentDBResponse>("SELECT id, nome, telefone, turno, transporte FROM alunos ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        tracing::debug!("Database layer: Retrieved {} students", students.len());

        Ok(students)
    }
}
