//! Transport stream for an SMTP session.
//!
//! One buffered, line-oriented stream that starts as plain TCP and either
//! stays that way, is opened encrypted from the start (implicit TLS), or is
//! swapped to TLS mid-session (STARTTLS).

use crate::error::{Error, Result};
use rustls::pki_types::ServerName;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::{TlsConnector, client::TlsStream};

/// Line-oriented transport carrying one SMTP session.
#[derive(Debug)]
pub struct SmtpStream {
    transport: Transport,
}

#[derive(Debug)]
enum Transport {
    Plain(BufReader<TcpStream>),
    Encrypted(Box<BufReader<TlsStream<TcpStream>>>),
}

/// What the protocol layer needs from either transport: buffered reads for
/// reply lines, writes for commands and message data.
trait Wire: AsyncBufRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncBufRead + AsyncWrite + Unpin + Send> Wire for T {}

impl SmtpStream {
    fn wire(&mut self) -> &mut dyn Wire {
        match &mut self.transport {
            Transport::Plain(stream) => stream,
            Transport::Encrypted(stream) => stream.as_mut(),
        }
    }

    /// Reads one reply line, trailing CRLF removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.wire().read_line(&mut line).await?;
        let line = line.trim_end().to_string();
        tracing::trace!(line, "S:");
        Ok(line)
    }

    /// Writes data and flushes. Commands and message lines alike go through
    /// here.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let wire = self.wire();
        wire.write_all(data).await?;
        wire.flush().await?;
        Ok(())
    }

    /// Swaps the plain transport for an encrypted one (STARTTLS).
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is already encrypted or the handshake
    /// fails.
    pub async fn upgrade_to_tls(self, hostname: &str) -> Result<Self> {
        let Transport::Plain(stream) = self.transport else {
            return Err(Error::Protocol("Already using TLS".into()));
        };

        tracing::debug!(hostname, "Upgrading connection to TLS");
        handshake(stream.into_inner(), hostname).await
    }
}

/// Connects to an SMTP server over plain TCP.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn connect(hostname: &str, port: u16) -> Result<SmtpStream> {
    let addr = format!("{hostname}:{port}");
    tracing::debug!(addr, "Connecting");
    let stream = TcpStream::connect(&addr).await?;
    Ok(SmtpStream {
        transport: Transport::Plain(BufReader::new(stream)),
    })
}

/// Connects to an SMTP server over TLS (implicit TLS on port 465).
///
/// # Errors
///
/// Returns an error if the connection or TLS handshake fails.
pub async fn connect_tls(hostname: &str, port: u16) -> Result<SmtpStream> {
    let addr = format!("{hostname}:{port}");
    tracing::debug!(addr, "Connecting over TLS");
    let stream = TcpStream::connect(&addr).await?;
    handshake(stream, hostname).await
}

/// Runs the rustls handshake over an established TCP stream, verifying the
/// server against the webpki root certificates.
async fn handshake(stream: TcpStream, hostname: &str) -> Result<SmtpStream> {
    let config = ClientConfig::builder()
        .with_root_certificates(RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        })
        .with_no_client_auth();
    let connector = TlsConnector::from(Arc::new(config));

    let tls = connector.connect(server_name(hostname)?, stream).await?;
    Ok(SmtpStream {
        transport: Transport::Encrypted(Box::new(BufReader::new(tls))),
    })
}

fn server_name(hostname: &str) -> Result<ServerName<'static>> {
    ServerName::try_from(hostname.to_string())
        .map_err(|_| Error::Protocol(format!("Invalid hostname: {hostname}")))
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

    #[test]
    fn test_server_name_accepts_dns_and_ip() {
        assert!(server_name("smtp.example.com").is_ok());
        assert!(server_name("127.0.0.1").is_ok());
    }

    #[test]
    fn test_server_name_rejects_garbage() {
        let err = server_name("not a hostname").unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
