//! Database record structures.
//!
//! Each struct maps one SELECT projection (`sqlx::FromRow`). Conversion to the wire format lives
//! in [`crate::api::models`], so API and storage can evolve independently.

pub mod attendance;
pub mod enrollments;
pub mod students;
