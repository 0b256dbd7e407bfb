use contracts::system::notifications::{Notification, UnreadCount};
use gloo_net::http::Request;
use uuid::Uuid;

use crate::shared::api_utils::{api_url, auth_header, decode, ensure_ok, ApiError};

/// Newest first
pub async fn fetch_notifications() -> Result<Vec<Notification>, ApiError> {
    let response = Request::get(&api_url("/api/system/notifications"))
        .header("Authorization", &auth_header()?)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    ensure_ok(&response)?;
    decode(response).await
}

pub async fn fetch_unread_count() -> Result<u32, ApiError> {
    let response = Request::get(&api_url("/api/system/notifications/unread-count"))
        .header("Authorization", &auth_header()?)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    ensure_ok(&response)?;
    let count: UnreadCount = decode(response).await?;
    Ok(count.unread)
}

pub async fn mark_read(id: Uuid) -> Result<(), ApiError> {
    let url = api_url(&format!("/api/system/notifications/{}/read", id));
    let response = Request::post(&url)
        .header("Authorization", &auth_header()?)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    ensure_ok(&response)
}
