//! The email value object and its line-sequence assembler.

use crate::attachment::Attachment;
use crate::clock::Clock;
use mailforge_mime::{CLOSE_BOUNDARY, DEFAULT_USER_AGENT, MimeDocument, MimeDocumentBuilder};

/// SMTP end-of-message marker: the CRLF terminating the closing boundary
/// line, then a lone dot on its own line.
pub const END_OF_MESSAGE: &str = "\r\n.\r\n";

/// An outbound email: envelope headers, a plain-text body, and attachments.
///
/// `build` recomputes the full wire-line sequence from the current state on
/// every call, so the email can be edited and rebuilt freely.
#[derive(Debug)]
pub struct Email {
    to: String,
    from: String,
    cc: String,
    subject: String,
    body: String,
    date: String,
    user_agent: String,
    attachments: Vec<Attachment>,
}

impl Email {
    /// Creates an empty email, stamping the Date header from `clock`.
    #[must_use]
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            to: String::new(),
            from: String::new(),
            cc: String::new(),
            subject: String::new(),
            body: String::new(),
            date: clock.timestamp(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            attachments: Vec::new(),
        }
    }

    /// Sets the To header and envelope recipient.
    pub fn set_to(&mut self, to: impl Into<String>) {
        self.to = to.into();
    }

    /// Sets the From header and envelope sender.
    pub fn set_from(&mut self, from: impl Into<String>) {
        self.from = from.into();
    }

    /// Sets the Cc header and secondary recipient.
    pub fn set_cc(&mut self, cc: impl Into<String>) {
        self.cc = cc.into();
    }

    /// Sets the Subject header.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    /// Sets the plain-text body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Sets the user agent advertised in the MIME header block.
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    /// Adds an attachment. The read from disk has already happened (or the
    /// bytes were supplied directly), so this cannot fail.
    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Removes the first attachment loaded from `file_name`. No-op if none
    /// matches.
    pub fn remove_attachment(&mut self, file_name: &str) {
        if let Some(index) = self
            .attachments
            .iter()
            .position(|attachment| attachment.file_name() == file_name)
        {
            self.attachments.remove(index);
        }
    }

    /// Envelope recipient.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Envelope sender.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Secondary recipient, empty when unset.
    #[must_use]
    pub fn cc(&self) -> &str {
        &self.cc
    }

    /// Assembles the complete message as ready-to-send wire lines.
    #[must_use]
    pub fn build(&self) -> Vec<String> {
        let mut document = MimeDocumentBuilder::new(&self.user_agent);
        self.assemble(&mut document)
    }

    /// Assembles the message through the given document.
    ///
    /// Header lines first, then the MIME body produced by `document`, then
    /// the closing boundary and the end-of-message marker. The marker's
    /// leading CRLF terminates the boundary line, so the boundary is pushed
    /// bare.
    pub fn assemble(&self, document: &mut dyn MimeDocument) -> Vec<String> {
        let mut lines = vec![
            format!("To: {}\r\n", self.to),
            format!("From: {}\r\n", self.from),
            format!("Cc: {}\r\n", self.cc),
            format!("Subject: {}\r\n", self.subject),
            format!("Date: {}\r\n", self.date),
        ];

        document.add_message(&self.body);
        for attachment in &self.attachments {
            document.add_attachment(attachment.file_name(), attachment.contents());
        }
        lines.extend(document.build());

        lines.push(CLOSE_BOUNDARY.to_string());
        lines.push(END_OF_MESSAGE.to_string());
        lines
    }
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
    use mailforge_mime::OPEN_BOUNDARY;

    /// Scripted stand-in for the real builder: records how the assembler
    /// drives it and hands back fixed lines.
    #[derive(Default)]
    struct FakeDocument {
        calls: Vec<String>,
        scripted: Vec<String>,
    }

    impl MimeDocument for FakeDocument {
        fn add_message(&mut self, text: &str) {
            self.calls.push(format!("message:{text}"));
        }

        fn remove_message(&mut self, text: &str) {
            self.calls.push(format!("remove_message:{text}"));
        }

        fn add_attachment(&mut self, file_name: &str, contents: &[u8]) {
            self.calls
                .push(format!("attachment:{file_name}:{}", contents.len()));
        }

        fn remove_attachment(&mut self, file_name: &str) {
            self.calls.push(format!("remove_attachment:{file_name}"));
        }

        fn build(&self) -> Vec<String> {
            self.scripted.clone()
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn timestamp(&self) -> String {
            "01/02/2026 03:04:05 +0000".to_string()
        }
    }

    fn sample_email() -> Email {
        let mut email = Email::new(&FixedClock);
        email.set_to("to@example.com");
        email.set_from("from@example.com");
        email.set_subject("Greetings");
        email.set_body("hi");
        email
    }

    #[test]
    fn test_assemble_order_with_fake_document() {
        let email = sample_email();
        let mut document = FakeDocument {
            scripted: vec!["BODY-LINE\r\n".to_string()],
            ..FakeDocument::default()
        };

        let lines = email.assemble(&mut document);
        assert_eq!(lines[0], "To: to@example.com\r\n");
        assert_eq!(lines[1], "From: from@example.com\r\n");
        assert_eq!(lines[2], "Cc: \r\n");
        assert_eq!(lines[3], "Subject: Greetings\r\n");
        assert_eq!(lines[4], "Date: 01/02/2026 03:04:05 +0000\r\n");
        assert_eq!(lines[5], "BODY-LINE\r\n");
        assert_eq!(lines[6], CLOSE_BOUNDARY);
        assert_eq!(lines[7], END_OF_MESSAGE);
        assert_eq!(document.calls, vec!["message:hi".to_string()]);
    }

    #[test]
    fn test_assemble_feeds_attachments_in_order() {
        let mut email = sample_email();
        email.add_attachment(Attachment::from_bytes("a.bin", vec![0; 3]));
        email.add_attachment(Attachment::from_bytes("b.bin", vec![0; 5]));

        let mut document = FakeDocument::default();
        email.assemble(&mut document);
        assert_eq!(
            document.calls,
            vec![
                "message:hi".to_string(),
                "attachment:a.bin:3".to_string(),
                "attachment:b.bin:5".to_string(),
            ]
        );
    }

    #[test]
    fn test_build_terminates_message() {
        let lines = sample_email().build();
        let joined = lines.concat();

        // Exactly one closing boundary, and the dot line ends the message.
        assert_eq!(joined.matches(CLOSE_BOUNDARY).count(), 1);
        assert!(joined.ends_with("\r\n.\r\n"));
        // The closing boundary line is terminated by the marker's CRLF, not
        // doubled.
        assert!(joined.contains(&format!("{CLOSE_BOUNDARY}\r\n.\r\n")));
    }

    #[test]
    fn test_build_contains_real_document() {
        let mut email = sample_email();
        email.add_attachment(Attachment::from_bytes("/a/b/test.txt", b"aaa".to_vec()));

        let lines = email.build();
        assert!(lines.contains(&format!("{OPEN_BOUNDARY}\r\n")));
        assert!(lines.contains(&"hi\r\n".to_string()));
        assert!(lines.contains(&" filename=test.txt\r\n".to_string()));
        assert!(lines.contains(&"YWFh\r\n".to_string()));
    }

    #[test]
    fn test_build_is_idempotent_and_tracks_removal() {
        let mut email = sample_email();
        email.add_attachment(Attachment::from_bytes("a.bin", vec![1, 2, 3]));
        assert_eq!(email.build(), email.build());

        email.remove_attachment("a.bin");
        let lines = email.build();
        assert!(!lines.iter().any(|line| line.contains("filename=a.bin")));
    }
}
