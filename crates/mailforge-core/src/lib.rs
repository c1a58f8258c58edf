//! # mailforge-core
//!
//! High-level email assembly and sending.
//!
//! This crate provides:
//! - The [`Email`] value object: headers, body, attachments
//! - Attachment loading from disk or memory
//! - Date-header timestamps with a configurable UTC offset
//! - [`send_email`]: the full SMTP conversation for one message
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailforge_core::{Attachment, Email, SmtpParams, Security, SystemClock, send_email};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> mailforge_core::Result<()> {
//!     let mut email = Email::new(&SystemClock::utc());
//!     email.set_from("sender@example.com");
//!     email.set_to("recipient@example.com");
//!     email.set_subject("Quarterly report");
//!     email.set_body("Report attached.");
//!     email.add_attachment(Attachment::from_file("report.pdf")?);
//!
//!     let params = SmtpParams {
//!         host: "smtp.example.com".into(),
//!         port: SmtpParams::default_port(Security::Tls),
//!         security: Security::Tls,
//!         username: SecretString::new("sender@example.com".into()),
//!         password: SecretString::new("app-password".into()),
//!     };
//!     send_email(&params, &email).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod attachment;
pub mod clock;
pub mod email;
mod error;
pub mod send;

pub use attachment::Attachment;
pub use clock::{Clock, SystemClock};
pub use email::{END_OF_MESSAGE, Email};
pub use error::{Error, Result};
pub use send::{Security, SmtpParams, send_email};
