//! High-level email sending over the SMTP transport.

use crate::email::Email;
use crate::error::{Error, Result};
use mailforge_smtp::connection::{connect, connect_tls};
use mailforge_smtp::{Address, Client, LineCursor};
use secrecy::{ExposeSecret, SecretString};

/// Security/encryption mode for the SMTP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Security {
    /// No encryption (not recommended).
    None,
    /// Implicit TLS (connect directly with TLS).
    #[default]
    Tls,
    /// STARTTLS upgrade after plaintext connect.
    StartTls,
}

impl Security {
    /// Get display name for the security mode.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None (insecure)",
            Self::Tls => "SSL/TLS",
            Self::StartTls => "STARTTLS",
        }
    }
}

/// SMTP server configuration.
///
/// Credentials are held wrapped: zeroed from memory on drop and redacted
/// from `Debug` output.
#[derive(Debug, Clone)]
pub struct SmtpParams {
    /// Server hostname.
    pub host: String,
    /// Server port (default: 465 for TLS, 587 for STARTTLS).
    pub port: u16,
    /// Security mode.
    pub security: Security,
    /// Username for authentication.
    pub username: SecretString,
    /// Password for authentication.
    pub password: SecretString,
}

impl SmtpParams {
    /// Get default port for the security mode.
    #[must_use]
    pub const fn default_port(security: Security) -> u16 {
        match security {
            Security::None | Security::StartTls => 587,
            Security::Tls => 465,
        }
    }
}

impl Default for SmtpParams {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 0,
            security: Security::default(),
            username: SecretString::new(String::new()),
            password: SecretString::new(String::new()),
        }
    }
}

/// Send an email using the given SMTP settings.
///
/// The full SMTP conversation: connect, EHLO, optional STARTTLS upgrade,
/// AUTH PLAIN, MAIL FROM, RCPT TO for the recipient and the Cc (if set),
/// DATA, the assembled message line by line, QUIT.
///
/// # Errors
///
/// Returns [`Error::NoRecipients`] if the email names no recipient, or
/// [`Error::Transport`] if any step of the conversation fails.
pub async fn send_email(params: &SmtpParams, email: &Email) -> Result<()> {
    if email.to().is_empty() {
        return Err(Error::NoRecipients);
    }

    tracing::debug!(
        host = %params.host,
        port = params.port,
        security = params.security.display_name(),
        "Connecting"
    );

    let stream = match params.security {
        Security::Tls => connect_tls(&params.host, params.port).await?,
        Security::StartTls | Security::None => connect(&params.host, params.port).await?,
    };

    let client = Client::from_stream(stream).await?;
    let client = client.ehlo("localhost").await?;

    let client = if params.security == Security::StartTls {
        client.starttls(&params.host).await?
    } else {
        client
    };

    let client = client
        .auth_plain(params.username.expose_secret(), &params.password)
        .await?;

    let client = client.mail_from(Address::new(email.from())?).await?;
    let mut client = client.rcpt_to(Address::new(email.to())?).await?;
    if !email.cc().is_empty() {
        client = client.rcpt_to(Address::new(email.cc())?).await?;
    }

    let client = client.data().await?;
    let client = client.send_document(LineCursor::new(email.build())).await?;
    client.quit().await?;

    tracing::info!(to = %email.to(), "Email sent");
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn test_default_ports() {
        assert_eq!(SmtpParams::default_port(Security::Tls), 465);
        assert_eq!(SmtpParams::default_port(Security::StartTls), 587);
        assert_eq!(SmtpParams::default_port(Security::None), 587);
    }

    #[test]
    fn test_security_defaults_to_tls() {
        assert_eq!(Security::default(), Security::Tls);
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let params = SmtpParams {
            username: SecretString::new("user@example.com".to_string()),
            password: SecretString::new("hunter2".to_string()),
            ..SmtpParams::default()
        };
        let rendered = format!("{params:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("user@example.com"));
    }

    #[tokio::test]
    async fn test_send_without_recipient_is_rejected() {
        let mut email = Email::new(&SystemClock::utc());
        email.set_from("from@example.com");

        let params = SmtpParams::default();
        let err = send_email(&params, &email).await.unwrap_err();
        assert!(matches!(err, Error::NoRecipients));
    }
}
