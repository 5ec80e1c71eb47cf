//! Chief Minister endpoints

use crate::models::{ChiefMinister, CmPayload};

use super::{ApiClient, ApiError};

pub async fn list(client: &ApiClient) -> Result<Vec<ChiefMinister>, ApiError> {
    client.get("/cm", &[]).await
}

pub async fn create(client: &ApiClient, payload: &CmPayload) -> Result<ChiefMinister, ApiError> {
    client.post("/cm/create", payload).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    payload: &CmPayload,
) -> Result<ChiefMinister, ApiError> {
    client.put(&format!("/cm/{}", id), payload).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/cm/{}", id)).await
}
