//! Issue-tracker wire types and the transition evidence document.

use serde::{Deserialize, Serialize};

/// An issue fetched with `expand=changelog`. Unused fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Issue {
    /// Issue fields.
    pub fields: IssueFields,
    /// Change history, oldest first.
    pub changelog: Changelog,
}

/// The subset of issue fields carried into evidence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueFields {
    /// One-line issue summary.
    pub summary: String,
}

/// Change history of an issue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Changelog {
    /// History entries, in service order.
    pub histories: Vec<History>,
}

/// One change event, possibly touching several fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct History {
    /// Who made the change.
    pub author: Author,
    /// When the change was made, as reported by the service.
    pub created: String,
    /// Individual field changes.
    pub items: Vec<ChangeItem>,
}

/// The user behind a change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    /// Display name.
    pub display_name: String,
    /// Email address; may be hidden by the user's privacy settings.
    pub email_address: String,
}

/// A single field change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeItem {
    /// Field that changed, e.g. `status`.
    pub field: String,
    /// Previous value, rendered.
    #[serde(rename = "fromString")]
    pub from_value: Option<String>,
    /// New value, rendered.
    #[serde(rename = "toString")]
    pub to_value: Option<String>,
}

/// Transition evidence for one issue.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransitionResult {
    /// Issue key as given on the command line.
    pub jira_id: String,
    /// Issue summary.
    pub summary: String,
    /// Whether the issue ever moved into the requested status.
    pub transition_found: bool,
    /// Display name of whoever made the transition; empty if not found.
    pub author: String,
    /// Email of whoever made the transition; empty if not found.
    pub author_user_name: String,
    /// When the transition happened; empty if not found.
    pub transition_time: String,
}

/// The transition evidence document written to standard output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionReport {
    /// Status name that was checked.
    pub transition: String,
    /// True when every issue has the transition.
    pub all_jira_transitions_found: bool,
    /// One entry per issue, in input order.
    pub tasks: Vec<TransitionResult>,
}

impl TransitionReport {
    /// Serializes the document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
