//! Checks a set of issues for a workflow transition.

use crate::config::JiraConfig;
use crate::context::ServiceContext;
use crate::deadline::Deadline;
use crate::error::Result;
use crate::ports::http::HttpRequest;
use crate::remote::get_json;

use super::model::{History, Issue, TransitionReport, TransitionResult};

/// URL of `key` with its changelog expanded.
#[must_use]
pub fn issue_url(base_url: &str, key: &str) -> String {
    format!("{base_url}/rest/api/2/issue/{key}?expand=changelog")
}

/// The first history entry that moves the issue into `transition`.
#[must_use]
pub fn find_transition<'a>(issue: &'a Issue, transition: &str) -> Option<&'a History> {
    issue.changelog.histories.iter().find(|history| {
        history
            .items
            .iter()
            .any(|item| item.field == "status" && item.to_value.as_deref() == Some(transition))
    })
}

fn evaluate(key: &str, issue: &Issue, transition: &str) -> TransitionResult {
    let mut result = TransitionResult {
        jira_id: key.to_string(),
        summary: issue.fields.summary.clone(),
        ..TransitionResult::default()
    };
    if let Some(history) = find_transition(issue, transition) {
        result.transition_found = true;
        result.author.clone_from(&history.author.display_name);
        result.author_user_name.clone_from(&history.author.email_address);
        result.transition_time.clone_from(&history.created);
    }
    result
}

/// Fetches every configured issue, in order, and reports the transition.
///
/// # Errors
///
/// Returns [`crate::error::EvidenceError::Transport`] as soon as one issue
/// cannot be fetched; no partial report is produced.
pub async fn run(ctx: &ServiceContext, config: &JiraConfig) -> Result<TransitionReport> {
    let deadline = Deadline::after(config.deadline);
    tracing::info!(
        transition = %config.transition,
        issues = config.issue_keys.len(),
        "checking issue transitions"
    );

    let mut tasks = Vec::with_capacity(config.issue_keys.len());
    for key in &config.issue_keys {
        let request = HttpRequest::get(issue_url(&config.base_url, key), config.credentials.clone());
        let issue: Issue = get_json(ctx.http.as_ref(), &deadline, &request).await?;
        let result = evaluate(key, &issue, &config.transition);
        tracing::info!(issue = %key, found = result.transition_found, "checked issue");
        tasks.push(result);
    }

    let all_jira_transitions_found = tasks.iter().all(|t| t.transition_found);
    Ok(TransitionReport { transition: config.transition.clone(), all_jira_transitions_found, tasks })
}
