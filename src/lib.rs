#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::uninlined_format_args
)]

//! Client-side session manager for a single-shot chat generation endpoint.
//!
//! The crate keeps an ordered transcript of user/assistant turns, persists it
//! across restarts with a one-hour expiry, stages an optional image
//! attachment per message, and drives one request at a time against the
//! Gemini `generateContent` API. The embedding UI observes the transcript and
//! the busy flag; it never mutates either directly.

pub mod attachment;
pub mod persistence;
pub mod providers;
pub mod session;

pub use attachment::{AttachmentError, AttachmentResource, PendingAttachment};
pub use persistence::PersistenceGateway;
pub use providers::{GeminiClient, GenerationError, Generator};
pub use session::{Sender, SessionController, SessionPhase, TranscriptStore, Turn};
