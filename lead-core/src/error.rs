use thiserror::Error;

/// Opaque failure of a data-layer operation. Callers only branch on
/// succeeded-vs-failed; the payload exists for console diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("{0}")]
    Graphql(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
}
