//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Path parameter extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(PathParam(inner))
    }
}

/// Numeric member id segment
#[derive(Debug, Clone, Copy)]
pub struct MemberIdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for MemberIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let PathParam(raw) = PathParam::<String>::from_request_parts(parts, state).await?;
        raw.parse()
            .map(MemberIdPath)
            .map_err(|_| ApiError::invalid_path(format!("Invalid member id: {raw}")))
    }
}
