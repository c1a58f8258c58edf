#![allow(
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::used_underscore_items
)]
//! Example: send an email with file attachments
//!
//! Assembles a multipart message with a text body and any files passed on the
//! command line, then delivers it over implicit TLS.
//!
//! ## Running
//!
//! ```bash
//! export SMTP_HOST="smtp.example.com"
//! export SMTP_USERNAME="sender@example.com"
//! export SMTP_PASSWORD="app-password"
//! export MAIL_TO="recipient@example.com"
//! cargo run --package mailforge-core --example send_attachments -- report.pdf photo.jpg
//! ```

use mailforge_core::{Attachment, Email, Security, SmtpParams, SystemClock, send_email};
use secrecy::SecretString;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let host = env::var("SMTP_HOST").expect("SMTP_HOST must be set");
    let username = env::var("SMTP_USERNAME").expect("SMTP_USERNAME must be set");
    let password = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD must be set");
    let to = env::var("MAIL_TO").expect("MAIL_TO must be set");

    let mut email = Email::new(&SystemClock::utc());
    email.set_from(username.clone());
    email.set_to(to.clone());
    email.set_subject("Files attached");
    email.set_body("Please find the attached files.");

    for path in env::args().skip(1) {
        println!("Attaching {path}");
        email.add_attachment(Attachment::from_file(&path)?);
    }

    let params = SmtpParams {
        host,
        port: SmtpParams::default_port(Security::Tls),
        security: Security::Tls,
        username: SecretString::new(username),
        password: SecretString::new(password),
    };

    println!("Sending to {to} via {}:{}", params.host, params.port);
    send_email(&params, &email).await?;
    println!("Sent.");

    Ok(())
}
