//! Extractors whose rejections go through [`crate::errors::Error`].
//!
//! Axum's stock `Json` and `Path` reject with plain-text bodies and a mix of 400/415/422. The
//! wrappers here turn every rejection into a 400 with the usual `{"error": ...}` JSON body.

use crate::errors::Error;
use axum::extract::{FromRequest, FromRequestParts};

/// `axum::Json` that rejects with [`Error::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` that rejects with [`Error::BadRequest`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);
