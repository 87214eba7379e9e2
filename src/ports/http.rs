//! HTTP port for authenticated GET requests against remote APIs.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`HttpClient`] to keep the trait dyn-compatible.
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Credentials attached to an outgoing request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Bearer <token>`.
    Bearer(String),
    /// HTTP basic authentication.
    Basic {
        /// Account name.
        username: String,
        /// Password or API token.
        password: String,
    },
}

// Secrets must never reach a log line.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(***)"),
            Self::Basic { username, .. } => {
                f.debug_struct("Basic").field("username", username).field("password", &"***").finish()
            }
        }
    }
}

/// An authenticated GET request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Absolute URL to fetch.
    pub url: String,
    /// Credentials sent with the request.
    pub credentials: Credentials,
}

impl HttpRequest {
    /// Creates a GET request for `url`.
    pub fn get(url: impl Into<String>, credentials: Credentials) -> Self {
        Self { url: url.into(), credentials }
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP requests against remote services.
///
/// A non-2xx response is still `Ok`; only failures to obtain a response at
/// all (DNS, connection, timeout, unreadable body) are errors.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request and buffers the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_>;
}
