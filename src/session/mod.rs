//! Session management — transcript types, the append-only store, and the
//! controller that drives the submit/response cycle.

pub mod controller;
pub mod transcript;
pub mod types;

pub use controller::{SessionController, SessionPhase};
pub use transcript::TranscriptStore;
pub use types::{PersistedSnapshot, Sender, Turn};
