//! Question endpoints

use crate::models::{Question, QuestionPage, QuestionPayload};

use super::{ApiClient, ApiError};

/// The `search` parameter is always sent, empty meaning "no filter".
pub async fn list(client: &ApiClient, search: &str) -> Result<QuestionPage, ApiError> {
    client
        .get("/questions/all", &[("search", search.to_string())])
        .await
}

pub async fn create(client: &ApiClient, payload: &QuestionPayload) -> Result<Question, ApiError> {
    client.post("/questions/create", payload).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    payload: &QuestionPayload,
) -> Result<Question, ApiError> {
    client.put(&format!("/questions/{}", id), payload).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/questions/{}", id)).await
}
