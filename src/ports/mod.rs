//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the evidence pipelines and an
//! external system (remote HTTP APIs, the local filesystem, the passage of
//! time). Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod http;

pub use clock::{Clock, SleepFuture};
pub use filesystem::FileSystem;
pub use http::{Credentials, HttpClient, HttpFuture, HttpRequest, HttpResponse};
