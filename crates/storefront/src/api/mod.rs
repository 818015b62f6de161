//! Marketplace backend API clients.
//!
//! # Architecture
//!
//! - One shared [`ApiClient`] per upstream, bound to a base URL and a
//!   fixed timeout; all domain modules dispatch through it
//! - The backend is the source of truth - NO local sync, direct API calls
//! - Failures are classified once, at the HTTP boundary, into [`ApiError`]
//!   variants; nothing above this layer inspects raw status codes
//!
//! # Upstreams
//!
//! ## Marketplace API
//! - Products, categories, cart, and authentication
//! - Bearer token attached for operations on the signed-in user
//!
//! ## User service
//! - Standalone registration endpoint (`/api/v1/users/registers`)
//!
//! # Example
//!
//! ```rust,ignore
//! use mango_storefront::api::{self, ApiClient};
//!
//! let client = ApiClient::new("http://localhost:3000/api")?;
//!
//! // Browse the catalog
//! let product = api::products::get(&client, &"prod-1".into()).await?;
//!
//! // Authenticated cart operation
//! let items = api::cart::items(&client, &token).await?;
//! ```

mod client;

pub mod auth;
pub mod cart;
pub mod categories;
pub mod products;
pub mod types;
pub mod users;

pub use client::ApiClient;

use thiserror::Error;

/// Errors that can occur when calling the marketplace backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed before a response was received (connect error,
    /// timeout, aborted transfer).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server responded with 401. The caller must treat the session
    /// as ended; recovery is never assumed.
    #[error("unauthorized")]
    Unauthorized {
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The server responded with any other non-2xx status. The body is
    /// retained verbatim so callers can extract structured error details.
    #[error("HTTP {status}: {}", truncate(.body))]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Status code of the response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    /// Raw response body, if one was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { body } | Self::Http { body, .. } => Some(body),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    /// Whether the server rejected the request as unauthenticated.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Cap a response body for log and error output.
fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_truncates_body() {
        let err = ApiError::Http {
            status: 500,
            body: "x".repeat(500),
        };
        let display = err.to_string();
        assert!(display.starts_with("HTTP 500: "));
        assert!(display.len() < 300);
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::Http {
            status: 422,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(422));

        let err = ApiError::Unauthorized {
            body: String::new(),
        };
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_api_error_body_accessor() {
        let err = ApiError::Http {
            status: 422,
            body: "{\"message\":\"nope\"}".to_string(),
        };
        assert_eq!(err.body(), Some("{\"message\":\"nope\"}"));
    }
}
