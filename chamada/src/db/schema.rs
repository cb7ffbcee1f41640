//! Schema bootstrap and default roster seeding.
//!
//! The tables are created with `CREATE TABLE IF NOT EXISTS`, so running [`bootstrap`] against an
//! existing database is a no-op. There is no version table: changing the schema of a populated
//! database is left to the operator.

use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

const CREATE_ALUNOS: &str = r#"
CREATE TABLE IF NOT EXISTS alunos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    telefone TEXT,
    turno TEXT,
    transporte TEXT
)
"#;

const CREATE_PRESENCA: &str = r#"
CREATE TABLE IF NOT EXISTS presenca (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    aluno_id INTEGER NOT NULL REFERENCES alunos (id) ON DELETE CASCADE,
    data TEXT NOT NULL,
    status TEXT NOT NULL,
    CONSTRAINT idx_aluno_data UNIQUE (aluno_id, data),
    -- Only canonical YYYY-MM-DD days, so one calendar day has exactly one spelling
    CONSTRAINT data_is_date CHECK (data IS date(data))
)
"#;

const CREATE_PROFESSORES: &str = r#"
CREATE TABLE IF NOT EXISTS professores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL
)
"#;

const CREATE_ATIVIDADES: &str = r#"
CREATE TABLE IF NOT EXISTS atividades (
    idatividades INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    idprofessor INTEGER REFERENCES professores (id)
)
"#;

// No foreign keys here: enrollments pointing at missing rows are tolerated and simply drop out of
// the joined views.
const CREATE_MATRICULA: &str = r#"
CREATE TABLE IF NOT EXISTS matricula (
    idmatricula INTEGER PRIMARY KEY AUTOINCREMENT,
    idaluno INTEGER,
    idatividades INTEGER,
    turno TEXT,
    horario TEXT,
    dia_semana TEXT,
    status TEXT DEFAULT 'ativo'
)
"#;

const SCHEMA: &[&str] = &[
    CREATE_ALUNOS,
    CREATE_PRESENCA,
    CREATE_PROFESSORES,
    CREATE_ATIVIDADES,
    CREATE_MATRICULA,
    "CREATE INDEX IF NOT EXISTS idx_matricula_aluno ON matricula (idaluno)",
];

/// Default roster inserted by [`seed_students`]: (nome, telefone, turno, transporte).
pub const DEFAULT_ROSTER: &[(&str, &str, &str, &str)] = &[
    ("Ana Silva", "123456789", "Manhã", "Onibus Branco"),
    ("Bruno Costa", "987654321", "Tarde", "Onibus Amarelo"),
    ("Carlos de Souza", "555555555", "Manhã", "Onibus Branco"),
    ("Daniela Martins", "111111111", "Tarde", "Onibus Amarelo"),
    ("Eduardo Ferreira", "999999999", "Manhã", "Onibus Amarelo"),
    ("Fernanda Lima", "777777777", "Tarde", "Onibus Branco"),
    ("Gabriel Ribeiro", "333333333", "Manhã", "Onibus Branco"),
];

/// Create every table the API reads or writes.
#[instrument(skip_all, err)]
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    debug!("Schema ready");
    Ok(())
}

/// Insert [`DEFAULT_ROSTER`] if, and only if, `alunos` is empty.
///
/// Returns the number of students inserted (0 when the table already had rows).
#[instrument(skip_all, err)]
pub async fn seed_students(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alunos").fetch_one(&mut *tx).await?;
    if existing > 0 {
        info!("Student roster already populated ({existing} rows), skipping seeding");
        tx.commit().await?;
        return Ok(0);
    }

    let mut inserted = 0;
    for (nome, telefone, turno, transporte) in DEFAULT_ROSTER {
        let result = sqlx::query("INSERT INTO alunos (nome, telefone, turno, transporte) VALUES (?, ?, ?, ?)")
            .bind(*nome)
            .bind(*telefone)
            .bind(*turno)
            .bind(*transporte)
            .execute(&mut *tx)
            .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;

    info!("Seeded {inserted} students");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn test_bootstrap_is_idempotent(pool: SqlitePool) {
        bootstrap(&pool).await.unwrap();
        bootstrap(&pool).await.unwrap();

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(tables, vec!["alunos", "atividades", "matricula", "presenca", "professores"]);
    }

    #[sqlx::test]
    async fn test_seed_students_only_fills_empty_roster(pool: SqlitePool) {
        bootstrap(&pool).await.unwrap();

        assert_eq!(seed_students(&pool).await.unwrap(), DEFAULT_ROSTER.len() as u64);
        assert_eq!(seed_students(&pool).await.unwrap(), 0);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alunos").fetch_one(&pool).await.unwrap();
        assert_eq!(count, DEFAULT_ROSTER.len() as i64);
    }

    #[sqlx::test]
    async fn test_attendance_date_must_be_canonical(pool: SqlitePool) {
        bootstrap(&pool).await.unwrap();
        sqlx::query("INSERT INTO alunos (nome) VALUES ('Ana Silva')").execute(&pool).await.unwrap();

        let insert = "INSERT INTO presenca (aluno_id, data, status) VALUES (1, ?, 'presente')";

        sqlx::query(insert).bind("2024-05-01").execute(&pool).await.unwrap();
        for data in ["2024-5-1", "banana", "2024-05-01 08:00:00", "2024-02-30"] {
            let err = sqlx::query(insert).bind(data).execute(&pool).await.unwrap_err();
            let db_err = err.as_database_error().expect("constraint error");
            assert!(db_err.is_check_violation(), "{data}: {db_err}");
        }
    }

    #[sqlx::test]
    async fn test_enrollment_status_defaults_to_ativo(pool: SqlitePool) {
        bootstrap(&pool).await.unwrap();

        sqlx::query("INSERT INTO matricula (idaluno, idatividades, turno, horario, dia_semana) VALUES (1, 1, 'Manhã', '08:00', 'Segunda')")
            .execute(&pool)
            .await
            .unwrap();
        let status: String = sqlx::query_scalar("SELECT status FROM matricula").fetch_one(&pool).await.unwrap();
        assert_eq!(status, "ativo");
    }
}
