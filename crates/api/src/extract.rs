//! Request extractors whose rejections render as [`AppError`] JSON bodies.
//!
//! Use these in place of `axum::Json` / `axum::extract::Query` for request
//! input so a malformed or incomplete body gets the same `{ error, code }`
//! shape as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body. A missing field or bad JSON becomes a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string parameters. A missing or unparseable parameter becomes a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
