//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`extract`]**: JSON and path extractors that reject with the API's `{"error": ...}` body
//!
//! # API Structure
//!
//! Every route lives under `/api`:
//!
//! - **Students** (`/api/alunos`): the roster, read-only
//! - **Attendance** (`/api/presenca`): listing and per-day submission of the call
//! - **Schedule** (`/api/grade`): enrollments joined with student, activity and teacher
//! - **Enrollments** (`/api/matriculas/*`): create, partial update and delete
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa` annotations. The document is served at
//! `/api-docs/openapi.json` and browsable at `/docs` when `enable_docs` is set.

pub mod extract;
pub mod handlers;
pub mod models;
