//! Replaying adapter for the `HttpClient` port.

use std::sync::Mutex;

use super::{next_interaction, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{HttpClient, HttpFuture, HttpRequest, HttpResponse};

/// Serves recorded HTTP responses from a cassette.
///
/// When the recorded input carries a URL, the request must target the same
/// URL; a mismatch is reported as a request failure.
pub struct ReplayingHttpClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpClient {
    /// Creates a replaying HTTP client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
        let interaction = next_interaction(&self.replayer, "http", "get")?;
        if let Some(recorded) = interaction.input.get("url").and_then(serde_json::Value::as_str) {
            if recorded != request.url {
                return Err(format!(
                    "http::get seq={}: recorded url {recorded} but request was for {}",
                    interaction.seq, request.url
                )
                .into());
            }
        }
        replay_result(&interaction.output, "http::get")
    }
}

impl HttpClient for ReplayingHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let result = self.replay(request);
        Box::pin(async move { result })
    }
}
