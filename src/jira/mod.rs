//! Workflow-transition evidence for issue-tracker tickets.

pub mod checker;
pub mod model;

pub use checker::{find_transition, run};
pub use model::TransitionReport;
