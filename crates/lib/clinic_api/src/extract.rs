//! Request extractors whose rejections render as [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body. A body that is missing its content type, is not JSON,
/// or does not match `T` is rejected with a 400 `validation_error`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
