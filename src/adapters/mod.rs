//! Adapter implementations of the port traits.
//!
//! - `live`: real network, disk, and timer.
//! - `recording`: wraps a live adapter and captures every interaction.
//! - `replaying`: serves interactions back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
