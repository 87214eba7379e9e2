//! Replaying adapters that replay recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod http;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use http::ReplayingHttpClient;

use std::sync::Mutex;

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;

/// Fetch the next recorded interaction for `port::method`.
///
/// Mirror of `recording::record_result` - reads instead of writing.
pub(crate) fn next_interaction(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<Interaction, Box<dyn std::error::Error + Send + Sync>> {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    let interaction = guard.next_interaction(port, method)?.clone();
    Ok(interaction)
}

/// Decode a recorded `Result` using the Ok/Err JSON convention.
///
/// - `{"Ok": v}` deserializes `v` as `T`
/// - `{"Err": "message"}` becomes an error carrying the message
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").ok_or_else(|| format!("{context}: expected Ok or Err output"))?;
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
