//! HTTP resource client for the Election Khelo API.
//!
//! Wraps `reqwest` with the base URL and the bearer session injected at
//! construction. Successful responses are unwrapped from the `{ data: ... }`
//! envelope; non-2xx responses surface the server's `message` field when one
//! is present.

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::session::Session;

pub mod cm;
pub mod errors;
pub mod questions;
pub mod users;

pub use errors::ApiError;

/// Shared HTTP wrapper used by every screen and CLI command.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    fn endpoint(&self, path: &str) -> String {
        join_endpoint(&self.base_url, path)
    }

    fn bearer(&self) -> Result<&str, ApiError> {
        self.session.token().ok_or(ApiError::NotSignedIn)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self
            .http
            .get(self.endpoint(path))
            .query(query)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "PUT");
        let response = self
            .http
            .put(self.endpoint(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// DELETE is status-checked only; delete endpoints return no body the
    /// client needs.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let response = self
            .http
            .delete(self.endpoint(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.data)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_for(status.as_u16(), &body))
    }
}

/// Map a non-2xx status and raw body to an `ApiError`, preferring the
/// server's own message.
fn error_for(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "request failed".to_string());

    ApiError::Api { status, message }
}

fn join_endpoint(base_url: &str, path: &str) -> String {
    format!("{}/api/v1{}", base_url, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChiefMinister;

    #[test]
    fn test_envelope_unwraps_data() {
        let raw = r#"{"data": [{
            "_id": "66aa01",
            "name": "A. Sharma",
            "party": "Unity Party",
            "state": "Rajasthan",
            "age": 58,
            "gender": "female",
            "is_current": false
        }]}"#;

        let envelope: Envelope<Vec<ChiefMinister>> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].name, "A. Sharma");
    }

    #[test]
    fn test_error_for_prefers_server_message() {
        let err = error_for(422, r#"{"message": "age must be a number"}"#);
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "age must be a number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_for_falls_back_to_generic_message() {
        for body in ["", "not json", r#"{"message": "  "}"#, r#"{"other": 1}"#] {
            match error_for(500, body) {
                ApiError::Api { status, message } => {
                    assert_eq!(status, 500);
                    assert_eq!(message, "request failed");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_error_for_maps_401_to_unauthorized() {
        assert!(error_for(401, r#"{"message": "expired"}"#).is_unauthorized());
    }

    #[test]
    fn test_join_endpoint() {
        assert_eq!(
            join_endpoint("http://localhost:8000", "/cm"),
            "http://localhost:8000/api/v1/cm"
        );
        assert_eq!(
            join_endpoint("https://api.example.com", "/questions/all"),
            "https://api.example.com/api/v1/questions/all"
        );
    }
}
