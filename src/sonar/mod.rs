//! Quality-gate evidence for the code analysis service.
//!
//! The scanner leaves a descriptor pointing at an asynchronous task; the
//! pipeline polls that task until it succeeds, fetches the gate verdict of
//! the resulting analysis, and assembles both into one document.

pub mod analysis;
pub mod assemble;
pub mod descriptor;
pub mod model;
pub mod pipeline;
pub mod poller;

pub use model::EvidenceDocument;
pub use pipeline::run;
