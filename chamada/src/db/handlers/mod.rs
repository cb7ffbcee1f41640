//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed `SqliteConnection` (a pooled connection or an open
//! transaction) and returns models from [`crate::db::models`].
//!
//! # Available Repositories
//!
//! - [`Students`]: read access to the roster (`alunos`)
//! - [`Attendance`]: attendance listing and the per-day upsert (`presenca`)
//! - [`Enrollments`]: enrollment CRUD plus the joined schedule views (`matricula`)
//!
//! # Common Pattern
//!
//! ```ignore
//! use chamada::db::handlers::Enrollments;
//!
//! async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Enrollments::new(&mut tx);
//!
//!     let deleted = repo.delete(42).await?;
//!
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod attendance;
pub mod enrollments;
pub mod students;

pub use attendance::Attendance;
pub use enrollments::Enrollments;
pub use students::Students;
