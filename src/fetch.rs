//! The data-access capability consumed by list controllers.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::query::ListQuery;
use crate::pagination::PageInfo;

/// Errors surfaced by a [`PageFetcher`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("session expired or unauthorized")]
    Unauthorized,

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

pub type FetchResult<T> = Result<PageResponse<T>, FetchError>;

/// One page of rows as returned by the backend list endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Option<PageInfo>,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, pagination: Option<PageInfo>) -> Self {
        Self { items, pagination }
    }
}

impl<T> PageResponse<T>
where
    T: for<'de> Deserialize<'de>,
{
    /// Decodes a JSON response body.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Resource-specific list endpoint.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    type Item: Send;

    async fn fetch_page(&self, query: &ListQuery) -> FetchResult<Self::Item>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Weapon {
        id: i32,
        name: String,
    }

    #[test]
    fn decodes_paginated_body() {
        let body = json!({
            "items": [{"id": 1, "name": "Skyward Harp"}],
            "pagination": {"totalPage": 4, "totalRecord": 37}
        })
        .to_string();

        let response = PageResponse::<Weapon>::from_json(&body).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(
            response.pagination,
            Some(PageInfo {
                total_page: 4,
                total_record: 37
            })
        );
    }

    #[test]
    fn pagination_is_optional() {
        let response = PageResponse::<Weapon>::from_json(r#"{"items": []}"#).unwrap();
        assert!(response.pagination.is_none());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = PageResponse::<Weapon>::from_json(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
