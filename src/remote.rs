//! JSON-over-HTTP helper shared by the remote API clients.

use serde::de::DeserializeOwned;

use crate::deadline::Deadline;
use crate::error::{EvidenceError, Result};
use crate::ports::http::{HttpClient, HttpRequest};

/// Performs an authenticated GET within `deadline` and decodes a JSON body.
///
/// Non-2xx responses and undecodable bodies become
/// [`EvidenceError::Transport`]; the raw body is logged at debug level and
/// kept on the error, never forwarded to the evidence output.
///
/// # Errors
///
/// Returns [`EvidenceError::Transport`] for any network, HTTP, or decoding failure.
pub async fn get_json<T: DeserializeOwned>(
    http: &dyn HttpClient,
    deadline: &Deadline,
    request: &HttpRequest,
) -> Result<T> {
    let url = request.url.as_str();
    tracing::debug!(url, remaining_secs = deadline.remaining().as_secs(), "GET");

    let response = deadline
        .guard(url, http.get(request))
        .await?
        .map_err(|e| EvidenceError::unreachable(url, e.to_string()))?;

    if !response.is_success() {
        tracing::debug!(url, status = response.status, body = %response.body, "unexpected HTTP status");
        return Err(EvidenceError::Transport {
            url: url.to_string(),
            status: Some(response.status),
            reason: "unexpected HTTP status".to_string(),
            body: Some(response.body),
        });
    }

    serde_json::from_str(&response.body).map_err(|e| {
        tracing::debug!(url, body = %response.body, "response body is not the expected JSON");
        EvidenceError::Transport {
            url: url.to_string(),
            status: Some(response.status),
            reason: format!("malformed response body: {e}"),
            body: Some(response.body.clone()),
        }
    })
}
