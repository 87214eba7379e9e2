//! Recording adapter for the `HttpClient` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{HttpClient, HttpFuture, HttpRequest};

/// Records HTTP interactions while delegating to an inner implementation.
///
/// Only the URL of each request is recorded; credentials never reach the
/// cassette.
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpClient {
    /// Creates a new recording HTTP client wrapping the given implementation.
    pub fn new(inner: Box<dyn HttpClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct UrlInput {
    url: String,
}

impl HttpClient for RecordingHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let input = UrlInput { url: request.url.clone() };
        let pending = self.inner.get(request);
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = pending.await;
            record_result(&recorder, "http", "get", &input, &result);
            result
        })
    }
}
