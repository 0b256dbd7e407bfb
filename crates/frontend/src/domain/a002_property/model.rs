use contracts::domain::a002_property::aggregate::{Property, PropertyDto};
use gloo_net::http::Request;
use std::sync::Arc;

use crate::shared::api_utils::{api_url, auth_header, decode, ensure_ok, ApiError};
use crate::shared::remote_table::{ItemsDataSource, RestResource};

const RESOURCE: &str = "properties";

pub fn data_source() -> Arc<dyn ItemsDataSource<Property>> {
    Arc::new(RestResource::<Property>::new(RESOURCE))
}

pub async fn fetch_by_id(id: u64) -> Result<Property, ApiError> {
    let response = Request::get(&api_url(&format!("/api/{}/{}", RESOURCE, id)))
        .header("Authorization", &auth_header()?)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    ensure_ok(&response)?;
    decode(response).await
}

pub async fn create(dto: &PropertyDto) -> Result<Property, ApiError> {
    let response = Request::post(&api_url(&format!("/api/{}", RESOURCE)))
        .header("Authorization", &auth_header()?)
        .json(dto)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    ensure_ok(&response)?;
    decode(response).await
}

pub async fn update(id: u64, dto: &PropertyDto) -> Result<Property, ApiError> {
    let response = Request::put(&api_url(&format!("/api/{}/{}", RESOURCE, id)))
        .header("Authorization", &auth_header()?)
        .json(dto)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    ensure_ok(&response)?;
    decode(response).await
}
