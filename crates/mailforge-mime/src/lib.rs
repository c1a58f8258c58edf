//! # mailforge-mime
//!
//! Base64 codec and multipart MIME document builder for outbound email.
//!
//! ## Features
//!
//! - **Base64**: standard and URL-safe alphabets, RFC-correct padding, strict
//!   decoding, optional padding stripping for the URL-safe form
//! - **Document building**: `multipart/mixed` bodies mixing plain-text parts
//!   and base64-encoded attachments, emitted as ready-to-send wire lines
//!
//! ## Quick Start
//!
//! ### Base64
//!
//! ```ignore
//! use mailforge_mime::base64;
//!
//! let encoded = base64::encode(b"Are we really free?");
//! let decoded = base64::decode(&encoded)?;
//!
//! // URL-safe, padding stripped
//! let token = base64::url_encode(b"\xfb\xef\xff", false);
//! let bytes = base64::url_decode(&token)?;
//! ```
//!
//! ### Building a document
//!
//! ```ignore
//! use mailforge_mime::{MimeDocument, MimeDocumentBuilder};
//!
//! let mut document = MimeDocumentBuilder::new("mailforge");
//! document.add_message("Please find the report attached.");
//! document.add_attachment("/tmp/report.pdf", &bytes);
//!
//! for line in document.build() {
//!     // each line is already CRLF-terminated for the wire
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod document;
mod error;

pub mod base64;

pub use document::{
    BOUNDARY, CLOSE_BOUNDARY, CRLF, DEFAULT_USER_AGENT, MimeDocument, MimeDocumentBuilder,
    OPEN_BOUNDARY,
};
pub use error::{Error, Result};
