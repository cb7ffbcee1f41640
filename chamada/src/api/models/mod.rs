//! API request and response data models.
//!
//! These structures define the public JSON contract. Field names are the ones existing clients
//! already send and read (`idaluno`, `dia_semana`, `chamadas`, ...), so they are not renamed.
//!
//! API models are distinct from database models ([`crate::db::models`]); each response type has a
//! `From` conversion from its database counterpart.
//!
//! - [`students`]: roster entries
//! - [`attendance`]: a day's call submission and stored attendance records
//! - [`schedule`]: rows of the joined schedule view
//! - [`enrollments`]: enrollment creation, partial update and responses

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod attendance;
pub mod enrollments;
pub mod schedule;
pub mod students;

/// Confirmation body returned by mutations that have nothing else to report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Matrícula atualizada com sucesso!")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
