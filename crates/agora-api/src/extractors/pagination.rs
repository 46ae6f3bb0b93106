//! Pagination extractor
//!
//! Extracts zero-based `page` and `size` query parameters.

use agora_core::value_objects::{PageRequest, DEFAULT_PAGE_SIZE};
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// Zero-based page index
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page
    #[serde(default)]
    pub size: Option<u32>,
}

/// Validated pagination parameters (size clamped to 1..=100)
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub PageRequest);

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self(PageRequest::new(
            params.page.unwrap_or(0),
            params.size.unwrap_or(DEFAULT_PAGE_SIZE),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(Pagination::from(params))
    }
}
