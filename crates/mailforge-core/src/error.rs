//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur while assembling or sending an email.
#[derive(Debug, Error)]
pub enum Error {
    /// An attachment could not be read from disk. Raised before the
    /// attachment is added anywhere, so the email is left unchanged.
    #[error("Failed to read attachment {path}: {source}")]
    AttachmentUnavailable {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// SMTP transport failed.
    #[error("Transport error: {0}")]
    Transport(#[from] mailforge_smtp::Error),

    /// The email names no recipient.
    #[error("No recipient specified")]
    NoRecipients,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
