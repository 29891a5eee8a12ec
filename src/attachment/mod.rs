//! Pending image attachment lifecycle: stage, preview, consume, clear.
//!
//! At most one attachment is pending at a time. Staging reads the file,
//! sniffs the image format from its magic bytes, and derives a base64
//! `data:` URI the embedding UI can render directly. The preview lives only
//! until it is consumed into a user turn on send, or cleared.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Staging failures. The previously staged attachment, if any, is left
/// untouched when one of these is returned.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("could not read attachment file: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("attachment is not a recognized image format")]
    UnrecognizedFormat,
}

/// A staged attachment awaiting send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub source_path: PathBuf,
    /// `data:<mime>;base64,<payload>` — renderable as-is by the UI.
    pub preview: String,
}

/// Holds the zero-or-one pending attachment slot.
#[derive(Debug, Default)]
pub struct AttachmentResource {
    pending: Option<PendingAttachment>,
}

impl AttachmentResource {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Stage `path` as the pending attachment, replacing any previous one.
    ///
    /// The file must sniff as a known image format; on failure the prior
    /// pending attachment survives and no transcript entry is produced.
    pub fn stage(&mut self, path: &Path) -> Result<&PendingAttachment, AttachmentError> {
        let bytes = std::fs::read(path)?;
        let format =
            image::guess_format(&bytes).map_err(|_| AttachmentError::UnrecognizedFormat)?;

        let preview = format!(
            "data:{};base64,{}",
            format.to_mime_type(),
            STANDARD.encode(&bytes)
        );

        Ok(self.pending.insert(PendingAttachment {
            source_path: path.to_path_buf(),
            preview,
        }))
    }

    /// Drop the pending attachment and its preview buffer.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Hand out the preview exactly once, emptying the slot. `None` when
    /// nothing is staged.
    pub fn consume(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.preview)
    }

    pub fn pending(&self) -> Option<&PendingAttachment> {
        self.pending.as_ref()
    }
}
