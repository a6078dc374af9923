//! Error taxonomy shared by normalization, the registry and input loading.

use std::path::PathBuf;

use crate::har::ValidationError;

/// Errors raised by the library. Everything here is fatal for the call that
/// produced it; a malformed JSON body is not an error (see `BodyDiagnostic`).
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    /// A raw request failed the validation gate; the whole batch is rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The URL could not be decomposed far enough to rebuild it.
    #[error("malformed url {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },

    /// Target metadata is incomplete, the key is taken, or no client is defined.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// A client was added to a target key that is not registered.
    #[error("no {0} target exists to add clients to")]
    UnknownTarget(String),

    /// Client metadata is incomplete or the key is taken under its target.
    #[error("invalid client: {0}")]
    InvalidClient(String),

    /// Input text is not valid JSON or does not have the request/HAR shape.
    #[error("parse HAR JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = SnippetError> = std::result::Result<T, E>;
