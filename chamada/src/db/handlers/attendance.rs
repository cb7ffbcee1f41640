//! Database repository for attendance records (`presenca`).

use crate::db::{
    errors::Result,
    models::attendance::{AttendanceDBResponse, AttendanceUpsertDBRequest},
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::instrument;

/// Rows per INSERT statement. Three bound parameters per row keeps each statement well below
/// SQLite's host parameter limit.
const UPSERT_CHUNK_SIZE: usize = 1000;

pub struct Attendance<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Attendance<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Every attendance record, projected to (aluno_id, data, status).
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<AttendanceDBResponse>> {
        let records = sqlx::query_as::<_, AttendanceDBResponse>("SELECT aluno_id, data, status FROM presenca ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        tracing::debug!("Database layer: Retrieved {} attendance records", records.len());

        Ok(records)
    }

    /// Insert-or-update one status per (aluno_id, data) for the submitted day.
    ///
    /// Students absent from the submission keep whatever record they already have for that date.
    /// Large submissions are split across several statements, so callers must pass an open
    /// transaction for the day to be written all-or-nothing.
    #[instrument(skip(self, request), fields(data = %request.data, count = request.chamadas.len()), err)]
    pub async fn upsert_day(&mut self, request: &AttendanceUpsertDBRequest) -> Result<u64> {
        let mut affected = 0;

        for chunk in request.chamadas.chunks(UPSERT_CHUNK_SIZE) {
            let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("INSERT INTO presenca (aluno_id, data, status) ");
            query.push_values(chunk, |mut row, entry| {
                row.push_bind(entry.aluno_id)
                    .push_bind(request.data.clone())
                    .push_bind(entry.status.clone());
            });
            query.push(" ON CONFLICT (aluno_id, data) DO UPDATE SET status = excluded.status");

            affected += query.build().execute(&mut *self.db).await?.rows_affected();
        }

        tracing::debug!("Database layer: Upserted {} attendance rows for {}", affected, request.data);

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use crate::db::models::attendance::CallEntryDBRequest;
    use crate::test_utils::insert_student;
    use sqlx::SqlitePool;

    fn call(aluno_id: i64, status: &str) -> CallEntryDBRequest {
        CallEntryDBRequest {
            aluno_id: Some(aluno_id),
            status: Some(status.to_string()),
        }
    }

    fn day(data: &str, chamadas: Vec<CallEntryDBRequest>) -> AttendanceUpsertDBRequest {
        AttendanceUpsertDBRequest {
            data: data.to_string(),
            chamadas,
        }
    }

    async fn status_of(pool: &SqlitePool, aluno_id: i64, data: &str) -> Option<String> {
        sqlx::query_scalar("SELECT status FROM presenca WHERE aluno_id = ? AND data = ?")
            .bind(aluno_id)
            .bind(data)
            .fetch_optional(pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_upsert_inserts_then_lists(pool: SqlitePool) {
        crate::db::schema::bootstrap(&pool).await.unwrap();
        let ana = insert_student(&pool, "Ana Silva").await;
        let bruno = insert_student(&pool, "Bruno Costa").await;

        let mut tx = pool.begin().await.unwrap();
        let affected = Attendance::new(&mut tx)
            .upsert_day(&day("2024-05-01", vec![call(ana, "presente"), call(bruno, "ausente")]))
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assert_eq!(affected, 2);

        let mut conn = pool.acquire().await.unwrap();
        let records = Attendance::new(&mut conn).list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.aluno_id == ana && r.data == "2024-05-01" && r.status == "presente"));
        assert!(records.iter().any(|r| r.aluno_id == bruno && r.data == "2024-05-01" && r.status == "ausente"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_upsert_merges_with_existing_day(pool: SqlitePool) {
        crate::db::schema::bootstrap(&pool).await.unwrap();
        let ana = insert_student(&pool, "Ana Silva").await;
        let bruno = insert_student(&pool, "Bruno Costa").await;

        let mut conn = pool.acquire().await.unwrap();
        Attendance::new(&mut conn)
            .upsert_day(&day("2024-05-01", vec![call(ana, "presente"), call(bruno, "presente")]))
            .await
            .unwrap();
        Attendance::new(&mut conn)
            .upsert_day(&day("2024-05-01", vec![call(ana, "ausente")]))
            .await
            .unwrap();
        drop(conn);

        assert_eq!(status_of(&pool, ana, "2024-05-01").await.as_deref(), Some("ausente"));
        assert_eq!(status_of(&pool, bruno, "2024-05-01").await.as_deref(), Some("presente"));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM presenca").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_upsert_keeps_other_days_apart(pool: SqlitePool) {
        crate::db::schema::bootstrap(&pool).await.unwrap();
        let ana = insert_student(&pool, "Ana Silva").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Attendance::new(&mut conn);
        repo.upsert_day(&day("2024-05-01", vec![call(ana, "presente")])).await.unwrap();
        repo.upsert_day(&day("2024-05-02", vec![call(ana, "ausente")])).await.unwrap();
        drop(conn);

        assert_eq!(status_of(&pool, ana, "2024-05-01").await.as_deref(), Some("presente"));
        assert_eq!(status_of(&pool, ana, "2024-05-02").await.as_deref(), Some("ausente"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_upsert_spanning_several_statements(pool: SqlitePool) {
        crate::db::schema::bootstrap(&pool).await.unwrap();

        let mut chamadas = Vec::new();
        for i in 0..(UPSERT_CHUNK_SIZE + 5) {
            let id = insert_student(&pool, &format!("Aluno {i}")).await;
            chamadas.push(call(id, "presente"));
        }

        let mut tx = pool.begin().await.unwrap();
        let affected = Attendance::new(&mut tx).upsert_day(&day("2024-05-01", chamadas)).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(affected, (UPSERT_CHUNK_SIZE + 5) as u64);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM presenca").fetch_one(&pool).await.unwrap();
        assert_eq!(count, (UPSERT_CHUNK_SIZE + 5) as i64);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unknown_student_rejected_and_rolled_back(pool: SqlitePool) {
        crate::db::schema::bootstrap(&pool).await.unwrap();
        let ana = insert_student(&pool, "Ana Silva").await;

        let mut tx = pool.begin().await.unwrap();
        let err = Attendance::new(&mut tx)
            .upsert_day(&day("2024-05-01", vec![call(ana, "presente"), call(ana + 999, "presente")]))
            .await
            .unwrap_err();
        drop(tx);

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "unexpected error: {err:?}");
        assert_eq!(status_of(&pool, ana, "2024-05-01").await, None);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_missing_status_rejected(pool: SqlitePool) {
        crate::db::schema::bootstrap(&pool).await.unwrap();
        let ana = insert_student(&pool, "Ana Silva").await;

        let mut conn = pool.acquire().await.unwrap();
        let err = Attendance::new(&mut conn)
            .upsert_day(&day(
                "2024-05-01",
                vec![CallEntryDBRequest {
                    aluno_id: Some(ana),
                    status: None,
                }],
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::CheckViolation { .. }), "unexpected error: {err:?}");
    }
}
