//! The generation seam the session controller speaks through.

use async_trait::async_trait;
use thiserror::Error;

/// Why a generation attempt produced no reply.
///
/// Both variants surface to the user as the same apology turn; the variant
/// only matters in diagnostics.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request never completed: DNS, TLS, connection, or a non-2xx
    /// status from the endpoint.
    #[error("request to generation endpoint failed: {0}")]
    NetworkFailure(String),
    /// The endpoint answered but the body carried no usable reply text.
    #[error("generation response did not contain a reply")]
    MalformedResponse,
}

/// A single-shot text generator. One attempt per call, no retries, no
/// streaming; each request is stateless from the service's point of view.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, user_text: &str) -> Result<String, GenerationError>;
}
