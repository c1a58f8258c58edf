//! # mailforge-smtp
//!
//! An async SMTP client that streams an assembled message to the server one
//! wire line at a time.
//!
//! ## Features
//!
//! - **Type-state connection management**: compile-time enforcement of valid
//!   SMTP state transitions
//! - **Protocol support**: EHLO, STARTTLS, AUTH PLAIN, MAIL FROM, RCPT TO,
//!   DATA, RSET, QUIT
//! - **TLS support**: both implicit TLS (port 465) and STARTTLS, over rustls
//! - **Pull-model transfer**: message data is drawn from a [`LineCursor`]
//!   owning the line sequence and its read position
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailforge_smtp::{Address, Client, LineCursor};
//! use mailforge_smtp::connection::connect;
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> mailforge_smtp::Result<()> {
//!     let stream = connect("smtp.example.com", 587).await?;
//!     let client = Client::from_stream(stream).await?;
//!
//!     let client = client.ehlo("localhost").await?;
//!     let client = client.starttls("smtp.example.com").await?;
//!     let password = SecretString::new("app-password".into());
//!     let client = client.auth_plain("user@example.com", &password).await?;
//!
//!     let client = client.mail_from(Address::new("sender@example.com")?).await?;
//!     let client = client.rcpt_to(Address::new("recipient@example.com")?).await?;
//!     let client = client.data().await?;
//!
//!     // `lines` is the fully assembled message, terminator included
//!     let client = client.send_document(LineCursor::new(lines)).await?;
//!     client.quit().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Connection States
//!
//! ```text
//! Connected ── auth_plain() ──→ Authenticated ── mail_from() ──→
//!     MailTransaction ── rcpt_to() ──→ RecipientAdded ── data() ──→ Data
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP command builders
//! - [`connection`]: Connection management and type-state client
//! - [`cursor`]: Pull-model line cursor
//! - [`parser`]: Response parser
//! - [`types`]: Core SMTP types (addresses, extensions, replies)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
pub mod cursor;
mod error;
pub mod parser;
pub mod types;

pub use connection::{
    Authenticated, Client, Connected, Data, MailTransaction, RecipientAdded, ServerInfo,
};
pub use cursor::LineCursor;
pub use error::{Error, Result};
pub use types::{Address, AuthMechanism, Extension, Reply, ReplyCode};
