use contracts::domain::a001_user::aggregate::{User, UserDto};
use gloo_net::http::Request;
use std::sync::Arc;

use crate::shared::api_utils::{api_url, auth_header, decode, ensure_ok, ApiError};
use crate::shared::remote_table::{ItemsDataSource, RestResource};

const RESOURCE: &str = "users";

pub fn data_source() -> Arc<dyn ItemsDataSource<User>> {
    Arc::new(RestResource::<User>::new(RESOURCE))
}

pub async fn create(dto: &UserDto) -> Result<User, ApiError> {
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
