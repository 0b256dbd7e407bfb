//! Items Data Source: paginated list and delete over one REST resource.

use async_trait::async_trait;
use contracts::shared::list_query::{DeleteResponse, ListQuery, ListResponse};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::shared::api_utils::{api_url, auth_header, decode, ensure_ok, ApiError};

#[async_trait(?Send)]
pub trait ItemsDataSource<T>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse<T>, ApiError>;

    async fn delete_one(&self, id: &str) -> Result<DeleteResponse, ApiError>;
}

/// `/api/<path>` collection endpoint
pub struct RestResource<T> {
    path: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> RestResource<T> {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            _item: PhantomData,
        }
    }

    pub fn collection_url(&self) -> String {
        api_url(&format!("/api/{}", self.path))
    }

    pub fn item_url(&self, id: &str) -> String {
        api_url(&format!("/api/{}/{}", self.path, id))
    }
}

pub fn encode_query(query: &ListQuery) -> Result<String, ApiError> {
    serde_qs::to_string(&query.to_params()).map_err(|e| ApiError::Encode(e.to_string()))
}

#[async_trait(?Send)]
impl<T> ItemsDataSource<T> for RestResource<T>
where
    T: DeserializeOwned + 'static,
{
    async fn list(&self, query: &ListQuery) -> Result<ListResponse<T>, ApiError> {
        let url = format!("{}?{}", self.collection_url(), encode_query(query)?);
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .header("Authorization", &auth_header()?)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        ensure_ok(&response)?;
        decode(response).await
    }

    async fn delete_one(&self, id: &str) -> Result<DeleteResponse, ApiError> {
        let url = self.item_url(id);
        log::debug!("DELETE {}", url);

        let response = Request::delete(&url)
            .header("Authorization", &auth_header()?)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        ensure_ok(&response)?;
        decode(response).await
    }
}
