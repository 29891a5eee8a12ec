//! Session controller — the single admission point for sends.
//!
//! The controller owns every piece of session state: the transcript store,
//! the pending input text, the attachment slot, and the in-flight flag. All
//! transitions happen on one logical thread of control; the network call is
//! the only suspension point. The submit guard, not the presentation layer,
//! is what prevents a stale UI or a fast double-click from starting two
//! concurrent requests.

use crate::attachment::{AttachmentError, AttachmentResource, PendingAttachment};
use crate::persistence::PersistenceGateway;
use crate::providers::{GenerationError, Generator};
use crate::session::transcript::TranscriptStore;
use crate::session::types::Turn;

use std::path::Path;

/// Fixed user-facing text substituted for any failed generation. The error
/// variant is logged, never shown.
pub const APOLOGY: &str = "Sorry, I couldn't process your request. Please try again.";

/// Where the session sits in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Sending,
}

/// Long-lived orchestrator for one conversational session.
pub struct SessionController<G> {
    generator: G,
    store: TranscriptStore,
    persistence: PersistenceGateway,
    attachment: AttachmentResource,
    pending_text: String,
    request_in_flight: bool,
}

impl<G: Generator> SessionController<G> {
    /// Build a controller, restoring any persisted transcript that has not
    /// expired. Persistence is injected so tests can point it at a
    /// temporary path.
    pub fn new(generator: G, persistence: PersistenceGateway) -> Self {
        let mut store = TranscriptStore::new();
        store.restore(persistence.load());

        Self {
            generator,
            store,
            persistence,
            attachment: AttachmentResource::new(),
            pending_text: String::new(),
            request_in_flight: false,
        }
    }

    // ── Observations ─────────────────────────────────────────────

    pub fn transcript(&self) -> &[Turn] {
        self.store.snapshot()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.request_in_flight {
            SessionPhase::Sending
        } else {
            SessionPhase::Idle
        }
    }

    pub fn input(&self) -> &str {
        &self.pending_text
    }

    pub fn pending_attachment(&self) -> Option<&PendingAttachment> {
        self.attachment.pending()
    }

    // ── Input mutation ───────────────────────────────────────────

    /// Mirror of the input box.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.pending_text = text.into();
    }

    /// Stage a file as the pending attachment. A failure leaves any prior
    /// attachment in place and produces no transcript entry.
    pub fn stage_attachment(&mut self, path: &Path) -> Result<(), AttachmentError> {
        self.attachment.stage(path)?;
        Ok(())
    }

    pub fn clear_attachment(&mut self) {
        self.attachment.clear();
    }

    // ── State machine ────────────────────────────────────────────

    /// Admission point. Rejects with `None` when there is nothing to send
    /// (blank text, no attachment) or a request is already in flight.
    ///
    /// On admission: the staged attachment, if any, is consumed into an
    /// image turn, non-blank text becomes a text turn, the input clears,
    /// the session enters `Sending`, and the transcript is persisted once.
    /// Returns the text the request should carry — possibly empty when
    /// only an image was sent.
    pub fn submit(&mut self) -> Option<String> {
        if self.request_in_flight {
            tracing::debug!("submit rejected: request already in flight");
            return None;
        }
        if self.pending_text.trim().is_empty() && self.attachment.pending().is_none() {
            return None;
        }

        if let Some(preview) = self.attachment.consume() {
            self.store.append(Turn::user_image(preview));
        }
        let text = std::mem::take(&mut self.pending_text);
        if !text.trim().is_empty() {
            self.store.append(Turn::user_text(text.clone()));
        }

        self.request_in_flight = true;
        self.persistence.save(self.store.snapshot());
        Some(text)
    }

    /// Completion of the in-flight request. Appends the assistant turn —
    /// the reply on success, the apology on failure — persists, and
    /// returns the session to `Idle`. Ignored when nothing is in flight.
    pub fn response_received(&mut self, result: Result<String, GenerationError>) {
        if !self.request_in_flight {
            tracing::debug!("response dropped: no request in flight");
            return;
        }

        let turn = match result {
            Ok(reply) => Turn::assistant(reply),
            Err(err) => {
                tracing::warn!("generation failed, substituting apology: {err}");
                Turn::assistant(APOLOGY)
            }
        };

        self.store.append(turn);
        self.request_in_flight = false;
        self.persistence.save(self.store.snapshot());
    }

    /// Drive one full submit → generate → resolve cycle. Returns whether
    /// the submission was admitted. There is no cancellation: once
    /// admitted, the request runs to completion.
    pub async fn send(&mut self) -> bool {
        let Some(text) = self.submit() else {
            return false;
        };
        let result = self.generator.generate(&text).await;
        self.response_received(result);
        true
    }
}
