//! Shared HTTP pipeline for the marketplace backend.
//!
//! One `reqwest` client per upstream, bound to a base URL, a fixed
//! timeout, and JSON default headers. Every response passes through the
//! same status triage before the body is parsed.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ApiError, truncate};

/// Every call either resolves once or fails once within this bound.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one marketplace upstream.
///
/// Cheap to clone; all clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client bound to `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored, so configuration
    /// accepts both `http://host/api` and `http://host/api/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    /// Base URL this client is bound to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Issue a GET request and parse the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] classifying the failure.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path, token)).await
    }

    /// Issue a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] classifying the failure.
    pub async fn get_with_query<T, Q>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path, token).query(query))
            .await
    }

    /// Issue a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] classifying the failure.
    pub async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path, token).json(body))
            .await
    }

    /// Issue a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] classifying the failure.
    pub async fn put<T, B>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path, token).json(body))
            .await
    }

    /// Issue a DELETE request, discarding any response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] classifying the failure.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.dispatch(self.request(Method::DELETE, path, token))
            .await
            .map(drop)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let request = self.inner.client.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.dispatch(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body),
                "failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Shared status triage. The body is read as text first so failed
    /// parses and non-2xx responses can both report what was received.
    async fn dispatch(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized { body });
        }

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %truncate(&body),
                "backend returned non-success status"
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
