use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use smartpark_core::error::CoreError;
use smartpark_core::pagination::PageRequest;
use smartpark_core::validation::Payload;

use crate::error::ApiError;

/// A request body checked against the payload's schema before it is
/// deserialized.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: Payload + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        match T::from_json(body) {
            Ok(payload) => Ok(JsonBody(payload)),
            Err(CoreError::Validation(err)) => Err(err.into()),
            Err(other) => Err(ApiError::validation(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    page: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
}

/// The `page`/`pageSize` pair of a list request.
#[derive(Debug, Clone, Copy)]
pub struct PageParams(pub PageRequest);

impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        let request = PageRequest::from_query(query.page.as_deref(), query.page_size.as_deref())?;
        Ok(PageParams(request))
    }
}
