//! Generic HTTP verb helpers.

use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

/// Client for the identity API service.
///
/// Holds one underlying connection pool and is safe for concurrent calls;
/// a single instance is normally shared for the process lifetime.
pub struct IdentityApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl IdentityApiClient {
    /// Creates a client for the service at the given base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    /// The base URL this client targets.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET returning a deserialized body; 404 yields the default value.
    pub(crate) async fn get_json<T: DeserializeOwned + Default>(
        &self,
        path: &str,
    ) -> ApiResult<T> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await?;
        Self::read_json(Method::GET, url, None, response).await
    }

    /// POST with a JSON body and no meaningful response body.
    pub(crate) async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path);
        let response = self.client.post(&url).json(body).send().await?;
        let request_body = serde_json::to_string(body).ok();
        Self::read_unit(Method::POST, url, request_body, response).await
    }

    /// PUT with a JSON body and no meaningful response body.
    pub(crate) async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path);
        let response = self.client.put(&url).json(body).send().await?;
        let request_body = serde_json::to_string(body).ok();
        Self::read_unit(Method::PUT, url, request_body, response).await
    }

    /// DELETE with no meaningful response body.
    pub(crate) async fn delete_unit(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        let response = self.client.delete(&url).send().await?;
        Self::read_unit(Method::DELETE, url, None, response).await
    }

    async fn read_json<T: DeserializeOwned + Default>(
        method: Method,
        url: String,
        request_body: Option<String>,
        response: Response,
    ) -> ApiResult<T> {
        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            StatusCode::NOT_FOUND => Ok(T::default()),
            _ => Err(Self::status_error(method, url, request_body, response).await),
        }
    }

    async fn read_unit(
        method: Method,
        url: String,
        request_body: Option<String>,
        response: Response,
    ) -> ApiResult<()> {
        if response.status() == StatusCode::OK {
            return Ok(());
        }
        Err(Self::status_error(method, url, request_body, response).await)
    }

    async fn status_error(
        method: Method,
        url: String,
        request_body: Option<String>,
        response: Response,
    ) -> ApiError {
        let status = response.status();
        let response_headers = response.headers().clone();
        // A body that cannot be read degrades to empty rather than masking
        // the status error.
        let response_body = response.text().await.unwrap_or_default();

        ApiError::Status {
            method,
            url,
            request_body,
            status,
            response_headers,
            response_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let client = IdentityApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.url("/api/identity/user"),
            "http://localhost:8080/api/identity/user"
        );
    }
}
