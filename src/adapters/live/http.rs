//! Live adapter for the `HttpClient` port using `reqwest`.

use std::time::Duration;

use reqwest::Client;

use crate::ports::http::{Credentials, HttpClient, HttpFuture, HttpRequest, HttpResponse};

/// Per-request timeout, independent of the run deadline.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Live HTTP client with a pooled connection set shared across requests.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Creates a new live HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend or connection pool cannot be initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .pool_idle_timeout(IDLE_CONNECTION_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpClient for LiveHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let builder = self.client.get(&request.url);
        let builder = match &request.credentials {
            Credentials::Bearer(token) => builder.bearer_auth(token),
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        };

        Box::pin(async move {
            let response = builder.send().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("request failed: {e}").into()
                },
            )?;

            let status = response.status().as_u16();
            let body =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("failed to read response body: {e}").into()
                })?;

            Ok(HttpResponse { status, body })
        })
    }
}
