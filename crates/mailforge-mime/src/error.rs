//! Error types for MIME operations.

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Base64 input that cannot be decoded: a character outside the active
    /// alphabet, a length that is not a positive multiple of four, or padding
    /// anywhere other than the end of the final block.
    #[error("Malformed base64 input: {0}")]
    MalformedInput(String),
}
