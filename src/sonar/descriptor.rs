//! Reader for the scanner's `report-task.txt` descriptor.
//!
//! The file is plain `key=value` lines written by the scanner at the end of
//! a run. Only `ceTaskUrl` matters here: it points at the task-status
//! endpoint for the analysis the scanner just submitted.

use std::path::Path;

use crate::error::{EvidenceError, Result};
use crate::ports::filesystem::FileSystem;

/// Key holding the task-status URL.
pub const TASK_URL_KEY: &str = "ceTaskUrl";

/// Location of the remote task-status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Absolute task-status URL. Never empty.
    pub task_status_url: String,
}

/// Reads the descriptor at `path` through the filesystem port.
///
/// # Errors
///
/// Returns [`EvidenceError::NotFound`] if the file cannot be read and
/// [`EvidenceError::MalformedDescriptor`] if it has no non-empty
/// `ceTaskUrl` entry.
pub fn read_descriptor(fs: &dyn FileSystem, path: &Path) -> Result<TaskDescriptor> {
    let content = fs.read_to_string(path).map_err(|e| EvidenceError::NotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let url = find_value(&content, TASK_URL_KEY)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| EvidenceError::MalformedDescriptor {
            path: path.to_path_buf(),
            key: TASK_URL_KEY,
        })?;

    tracing::info!(path = %path.display(), task_url = url, "read task descriptor");
    Ok(TaskDescriptor { task_status_url: url.to_string() })
}

/// Returns the value of the first `key=value` line whose key is `key`.
///
/// Blank lines and lines starting with `#` are skipped, lines without `=`
/// are ignored, and key and value are trimmed. The value may itself
/// contain `=`.
#[must_use]
pub fn find_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct InMemory(Option<&'static str>);

    impl FileSystem for InMemory {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| format!("{}: No such file or directory", path.display()).into())
        }
    }

    const SCANNER_OUTPUT: &str = "\
projectKey=acme_shop
serverUrl=https://sonarcloud.io
serverVersion=8.0.0.65
dashboardUrl=https://sonarcloud.io/dashboard?id=acme_shop
ceTaskId=AZTQ2v-AB5ENJWDkXsh4
ceTaskUrl=https://sonarcloud.io/api/ce/task?id=AZTQ2v-AB5ENJWDkXsh4
";

    #[test]
    fn finds_task_url_in_scanner_output() {
        let descriptor =
            read_descriptor(&InMemory(Some(SCANNER_OUTPUT)), Path::new("report-task.txt")).unwrap();
        assert_eq!(
            descriptor.task_status_url,
            "https://sonarcloud.io/api/ce/task?id=AZTQ2v-AB5ENJWDkXsh4"
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = "# generated\n\n#ceTaskUrl=https://wrong\nceTaskUrl=https://x/task\n";
        assert_eq!(find_value(content, TASK_URL_KEY), Some("https://x/task"));
    }

    #[test]
    fn first_occurrence_wins() {
        let content = "ceTaskUrl=https://first\nceTaskUrl=https://second\n";
        assert_eq!(find_value(content, TASK_URL_KEY), Some("https://first"));
    }

    #[test]
    fn trims_key_and_value_and_splits_on_first_equals() {
        let content = "  ceTaskUrl =  https://x/api/ce/task?id=abc==  \n";
        assert_eq!(find_value(content, TASK_URL_KEY), Some("https://x/api/ce/task?id=abc=="));
    }

    #[test]
    fn lines_without_equals_are_ignored() {
        let content = "ceTaskUrl\nceTaskUrl=https://x/task\n";
        assert_eq!(find_value(content, TASK_URL_KEY), Some("https://x/task"));
    }

    #[test]
    fn missing_key_is_malformed() {
        let err = read_descriptor(&InMemory(Some("projectKey=acme\n")), Path::new("r.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            EvidenceError::MalformedDescriptor { key: TASK_URL_KEY, ref path } if path == &PathBuf::from("r.txt")
        ));
    }

    #[test]
    fn empty_value_is_malformed() {
        let err = read_descriptor(&InMemory(Some("ceTaskUrl=   \n")), Path::new("r.txt"))
            .unwrap_err();
        assert!(matches!(err, EvidenceError::MalformedDescriptor { .. }));
    }

    #[test]
    fn unreadable_file_is_not_found() {
        let err = read_descriptor(&InMemory(None), Path::new("missing.txt")).unwrap_err();
        match err {
            EvidenceError::NotFound { path, reason } => {
                assert_eq!(path, PathBuf::from("missing.txt"));
                assert!(reason.contains("No such file"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
