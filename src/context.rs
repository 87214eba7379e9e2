//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::http::LiveHttpClient;
use crate::adapters::recording::filesystem::RecordingFileSystem;
use crate::adapters::recording::http::RecordingHttpClient;
use crate::adapters::replaying::{ReplayingClock, ReplayingFileSystem, ReplayingHttpClient};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::{EvidenceError, Result};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::http::HttpClient;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// HTTP client for the remote analysis and issue-tracker APIs.
    pub http: Box<dyn HttpClient>,
    /// Filesystem for reading local descriptor files.
    pub fs: Box<dyn FileSystem>,
    /// Clock used to wait between poll attempts.
    pub clock: Box<dyn Clock>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn live() -> Result<Self> {
        Ok(Self {
            http: Box::new(live_http()?),
            fs: Box::new(LiveFileSystem),
            clock: Box::new(LiveClock),
            recorder: None,
        })
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// Uses live adapters for actual work. HTTP and filesystem interactions
    /// are captured into the cassette at `path`. This is the developer-only
    /// mechanism for capturing cassettes via the `CI_EVIDENCE_RECORD` env var.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn recording(path: &Path) -> Result<Self> {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "ci-evidence-session")));

        Ok(Self {
            http: Box::new(RecordingHttpClient::new(
                Box::new(live_http()?),
                Arc::clone(&recorder),
            )),
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            clock: Box::new(LiveClock),
            recorder: Some(recorder),
        })
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// HTTP and filesystem ports are served from the cassette, each with its
    /// own cursor; sleeps resolve immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvidenceError::Config(format!("failed to read cassette file {}: {e}", path.display()))
        })?;
        let cassette = Cassette::from_yaml(&content).map_err(|e| {
            EvidenceError::Config(format!("failed to parse cassette file {}: {e}", path.display()))
        })?;

        Ok(Self::from_cassette(&cassette))
    }

    /// Creates a replaying context from an already loaded cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self {
            http: Box::new(ReplayingHttpClient::new(CassetteReplayer::new(cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))),
            clock: Box::new(ReplayingClock::new()),
            recorder: None,
        }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            let guard = recorder.lock().expect("recorder lock poisoned");
            match guard.save() {
                Ok(path) => {
                    tracing::info!(
                        path = %path.display(),
                        interactions = guard.len(),
                        "cassette written"
                    );
                }
                Err(e) => tracing::warn!(error = %e, "failed to write cassette"),
            }
        }
    }
}

fn live_http() -> Result<LiveHttpClient> {
    LiveHttpClient::new()
        .map_err(|e| EvidenceError::Config(format!("failed to initialize HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Credentials, HttpRequest};

    #[test]
    fn live_context_builds() {
        assert!(ServiceContext::live().is_ok());
    }

    #[tokio::test]
    async fn replaying_context_serves_fs_and_http() {
        let dir = std::env::temp_dir().join("ci_evidence_ctx_replay");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.cassette.yaml");
        std::fs::write(
            &path,
            r#"
name: replay
recorded_at: 2025-02-04T12:47:08Z
tool_version: 0.1.0
interactions:
  - seq: 0
    port: fs
    method: read_to_string
    input: { path: report-task.txt }
    output: { Ok: "ceTaskUrl=https://x/task" }
  - seq: 1
    port: http
    method: get
    input: { url: "https://x/task" }
    output: { Ok: { status: 200, body: "{}" } }
"#,
        )
        .unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let content = ctx.fs.read_to_string(Path::new("report-task.txt")).unwrap();
        assert_eq!(content, "ceTaskUrl=https://x/task");

        let response = ctx
            .http
            .get(&HttpRequest::get("https://x/task", Credentials::Bearer("t".into())))
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_cassette_is_config_error() {
        let result = ServiceContext::replaying(Path::new("/nonexistent/none.cassette.yaml"));
        assert!(matches!(result, Err(EvidenceError::Config(_))));
    }

    #[test]
    fn recording_context_writes_cassette_on_drop() {
        let dir = std::env::temp_dir().join("ci_evidence_ctx_record");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("run.cassette.yaml");
        std::fs::create_dir_all(&dir).unwrap();
        let descriptor = dir.join("report-task.txt");
        std::fs::write(&descriptor, "ceTaskUrl=https://x/task\n").unwrap();

        {
            let ctx = ServiceContext::recording(&path).unwrap();
            ctx.fs.read_to_string(&descriptor).unwrap();
        }

        let cassette = Cassette::from_yaml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].port, "fs");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
