//! HTTP request handlers for all API endpoints.
//!
//! Each handler validates its input, runs the matching repository call on a pooled connection
//! (or a transaction, for multi-statement writes) and maps the outcome onto a status code.
//!
//! # Handler Modules
//!
//! - [`students`]: roster listing
//! - [`attendance`]: attendance listing and the per-day upsert
//! - [`schedule`]: the joined schedule view
//! - [`enrollments`]: enrollment listing per student, creation, partial update and deletion
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`], which renders as `{"error": "..."}` with 400, 404 or
//! 500. Storage failures keep a fixed per-operation prefix in front of the database message.

pub mod attendance;
pub mod enrollments;
pub mod schedule;
pub mod students;
