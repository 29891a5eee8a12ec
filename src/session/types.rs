//! Transcript types — turn sender, turns, and the persisted snapshot shape.

use serde::{Deserialize, Serialize};

/// Author of a transcript turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One entry in the transcript. Immutable once appended.
///
/// A turn carries text, an attachment reference, or both — never neither.
/// The constructors below are the only way turns are built, which keeps
/// that invariant out of the hands of callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub sender: Sender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_ref: Option<String>,
}

impl Turn {
    /// A user turn carrying only text.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: Some(text.into()),
            attachment_ref: None,
        }
    }

    /// A user turn carrying only an image attachment reference
    /// (a `data:` URI renderable by the embedding UI).
    pub fn user_image(attachment_ref: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: None,
            attachment_ref: Some(attachment_ref.into()),
        }
    }

    /// An assistant turn carrying reply text.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: Some(text.into()),
            attachment_ref: None,
        }
    }
}

/// On-disk snapshot: the transcript plus the wall-clock time it was saved.
///
/// The save time drives the one-hour expiry check performed once at load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedSnapshot {
    pub transcript: Vec<Turn>,
    pub saved_at_epoch_millis: i64,
}
