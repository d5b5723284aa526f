//! Extractors whose rejections render as [`ApiFailure`] 400 envelopes
//! instead of axum's plain-text defaults.

use axum::extract::{FromRequest, FromRequestParts};

use super::failure::ApiFailure;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiFailure))]
pub struct JsonBody<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiFailure))]
pub struct PathParam<T>(pub T);

/// Typed query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiFailure))]
pub struct QueryParams<T>(pub T);
