//! Multipart MIME document assembly.
//!
//! A [`MimeDocumentBuilder`] collects plain-text messages and binary
//! attachments and materializes, on demand, the ordered sequence of wire
//! lines for a `multipart/mixed` body. Every line is already CRLF-terminated
//! where the protocol requires it, so the transport can write the sequence
//! verbatim. The builder produces the body only: the closing boundary line
//! and the end-of-message marker belong to the email assembly layer.

use crate::base64;
use std::path::Path;

macro_rules! boundary_token {
    () => {
        "----------030203080101020302070708"
    };
}

/// Boundary token declared in the document header.
pub const BOUNDARY: &str = boundary_token!();

/// Opening boundary line body (`--` + boundary). Both closes the previous
/// part and opens the next one.
pub const OPEN_BOUNDARY: &str = concat!("--", boundary_token!());

/// Closing boundary line body (`--` + boundary + `--`). Emitted exactly once,
/// by the caller, after the built body.
pub const CLOSE_BOUNDARY: &str = concat!("--", boundary_token!(), "--");

/// Wire line terminator.
pub const CRLF: &str = "\r\n";

/// Attachment data is split into lines of this many base64 characters. A
/// multiple of four, so a line break never falls inside a 4-character group.
const CHUNK_SIZE: usize = 512;

/// User agent advertised when none is supplied.
pub const DEFAULT_USER_AGENT: &str = "mailforge";

/// Capability interface for a multipart document under construction.
///
/// The shipping implementation is [`MimeDocumentBuilder`]; tests substitute
/// scripted fakes to observe how callers drive the document.
pub trait MimeDocument {
    /// Appends a plain-text part. The text is taken as-is, no validation.
    fn add_message(&mut self, text: &str);

    /// Removes the first part whose text matches exactly. No-op otherwise.
    fn remove_message(&mut self, text: &str);

    /// Appends an attachment part from a file name and its full contents.
    fn add_attachment(&mut self, file_name: &str, contents: &[u8]);

    /// Removes the first attachment stored under `file_name`, comparing the
    /// name as given to [`MimeDocument::add_attachment`]. When duplicates
    /// share a name, the earliest insertion wins. No-op otherwise.
    fn remove_attachment(&mut self, file_name: &str);

    /// Materializes the ordered line sequence for the current state.
    ///
    /// Recomputed on every call; mutations between calls are always
    /// reflected. An empty document yields an empty sequence.
    fn build(&self) -> Vec<String>;
}

/// One stored attachment: display name plus contents held fully in memory.
#[derive(Debug, Clone)]
struct AttachmentPart {
    file_name: String,
    contents: Vec<u8>,
}

impl AttachmentPart {
    /// Base file name component; directory components are never emitted.
    fn display_name(&self) -> String {
        Path::new(&self.file_name)
            .file_name()
            .map_or_else(|| self.file_name.clone(), |name| name.to_string_lossy().into_owned())
    }
}

/// Builder for a `multipart/mixed` MIME body.
#[derive(Debug, Clone)]
pub struct MimeDocumentBuilder {
    user_agent: String,
    messages: Vec<String>,
    attachments: Vec<AttachmentPart>,
}

impl MimeDocumentBuilder {
    /// Creates an empty document advertising the given user agent.
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            messages: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Emitted once, lazily: only a non-empty document has a header block.
    fn header_lines(&self, lines: &mut Vec<String>) {
        lines.push(format!("User-Agent: {}\r\n", self.user_agent));
        lines.push("MIME-Version: 1.0\r\n".to_string());
        lines.push("Content-Type: multipart/mixed;\r\n".to_string());
        lines.push(format!(" boundary=\"{BOUNDARY}\"\r\n"));
        lines.push("\r\nThis is a multi-part message in MIME format.\r\n".to_string());
        lines.push(format!("{OPEN_BOUNDARY}\r\n"));
    }

    fn message_lines(&self, lines: &mut Vec<String>) {
        for message in &self.messages {
            lines.push("Content-Type: text/plain; charset=utf-8; format=flowed\r\n".to_string());
            lines.push("Content-Transfer-Encoding: 7bit\r\n".to_string());
            lines.push(CRLF.to_string());
            lines.push(format!("{message}\r\n"));
            lines.push(format!("{OPEN_BOUNDARY}\r\n"));
        }
    }

    fn attachment_lines(&self, lines: &mut Vec<String>) {
        for attachment in &self.attachments {
            let encoded = base64::encode(&attachment.contents);

            lines.push("Content-Type: application/octet-stream\r\n".to_string());
            lines.push("Content-Transfer-Encoding: base64\r\n".to_string());
            lines.push("Content-Disposition: attachment;\r\n".to_string());
            lines.push(format!(" filename={}\r\n", attachment.display_name()));
            lines.push(CRLF.to_string());

            // Base64 output is ASCII, so splitting at CHUNK_SIZE byte offsets
            // is always a character boundary. Zero-length contents encode to
            // an empty string and produce no data lines at all.
            let mut rest = encoded.as_str();
            while !rest.is_empty() {
                let (chunk, tail) = rest.split_at(rest.len().min(CHUNK_SIZE));
                lines.push(format!("{chunk}\r\n"));
                rest = tail;
            }

            lines.push(CRLF.to_string());
            lines.push(format!("{OPEN_BOUNDARY}\r\n"));
        }
    }
}

impl Default for MimeDocumentBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

impl MimeDocument for MimeDocumentBuilder {
    fn add_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn remove_message(&mut self, text: &str) {
        if let Some(index) = self.messages.iter().position(|message| message == text) {
            self.messages.remove(index);
        }
    }

    fn add_attachment(&mut self, file_name: &str, contents: &[u8]) {
        self.attachments.push(AttachmentPart {
            file_name: file_name.to_string(),
            contents: contents.to_vec(),
        });
    }

    fn remove_attachment(&mut self, file_name: &str) {
        if let Some(index) = self
            .attachments
            .iter()
            .position(|attachment| attachment.file_name == file_name)
        {
            self.attachments.remove(index);
        }
    }

    fn build(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.messages.is_empty() && self.attachments.is_empty() {
            return lines;
        }

        self.header_lines(&mut lines);
        self.message_lines(&mut lines);
        self.attachment_lines(&mut lines);
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

    const HEADER_LINES: usize = 6;

    fn open_boundary_line() -> String {
        format!("{OPEN_BOUNDARY}\r\n")
    }

    #[test]
    fn test_empty_document_builds_nothing() {
        let document = MimeDocumentBuilder::new("test bot");
        assert!(document.build().is_empty());
    }

    #[test]
    fn test_header_block() {
        let mut document = MimeDocumentBuilder::new("test bot");
        document.add_message("hi");

        let lines = document.build();
        assert_eq!(lines[0], "User-Agent: test bot\r\n");
        assert_eq!(lines[1], "MIME-Version: 1.0\r\n");
        assert_eq!(lines[2], "Content-Type: multipart/mixed;\r\n");
        assert_eq!(lines[3], format!(" boundary=\"{BOUNDARY}\"\r\n"));
        assert_eq!(
            lines[4],
            "\r\nThis is a multi-part message in MIME format.\r\n"
        );
        assert_eq!(lines[5], open_boundary_line());
    }

    #[test]
    fn test_single_message_document() {
        let mut document = MimeDocumentBuilder::new("test bot");
        document.add_message("hi");

        let lines = document.build();
        // One opening boundary after the header block, none besides.
        let trailing = &lines[HEADER_LINES..];
        let boundaries = trailing
            .iter()
            .filter(|line| **line == open_boundary_line())
            .count();
        assert_eq!(boundaries, 1);
        assert_eq!(trailing.last().unwrap(), &open_boundary_line());

        assert!(lines.iter().any(|line| *line == "hi\r\n"));
        assert!(!lines.iter().any(|line| line.contains("Content-Disposition")));
    }

    #[test]
    fn test_attachment_filename_is_basename() {
        let mut document = MimeDocumentBuilder::default();
        document.add_attachment("/a/b/test.txt", b"contents");

        let lines = document.build();
        assert!(lines.contains(&" filename=test.txt\r\n".to_string()));
        assert!(!lines.iter().any(|line| line.contains("/a/b/")));
    }

    #[test]
    fn test_attachment_part_layout() {
        let mut document = MimeDocumentBuilder::default();
        document.add_attachment("test.txt", b"aaa");

        let lines = document.build();
        let trailing = &lines[HEADER_LINES..];
        assert_eq!(trailing[0], "Content-Type: application/octet-stream\r\n");
        assert_eq!(trailing[1], "Content-Transfer-Encoding: base64\r\n");
        assert_eq!(trailing[2], "Content-Disposition: attachment;\r\n");
        assert_eq!(trailing[3], " filename=test.txt\r\n");
        assert_eq!(trailing[4], "\r\n");
        assert_eq!(trailing[5], "YWFh\r\n");
        assert_eq!(trailing[6], "\r\n");
        assert_eq!(trailing[7], open_boundary_line());
    }

    fn data_lines(lines: &[String]) -> Vec<&String> {
        // Data lines sit between the blank line after the attachment headers
        // and the blank line before the boundary.
        let start = lines
            .iter()
            .position(|line| line == " filename=blob.bin\r\n")
            .unwrap()
            + 2;
        let end = lines.len() - 2;
        lines[start..end].iter().collect()
    }

    #[test]
    fn test_chunking_splits_at_512_characters() {
        // 600 bytes encode to 800 characters: one full line plus a short one.
        let contents = vec![0x42u8; 600];
        let mut document = MimeDocumentBuilder::default();
        document.add_attachment("blob.bin", &contents);

        let lines = document.build();
        let data = data_lines(&lines);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].len(), 512 + 2);
        assert_eq!(data[1].len(), 288 + 2);

        let joined: String = data
            .iter()
            .map(|line| line.trim_end_matches("\r\n"))
            .collect();
        assert_eq!(joined, base64::encode(&contents));
    }

    #[test]
    fn test_chunking_exact_multiple() {
        // 384 bytes encode to exactly 512 characters: one full line, no
        // empty trailing data line.
        let contents = vec![0x42u8; 384];
        let mut document = MimeDocumentBuilder::default();
        document.add_attachment("blob.bin", &contents);

        let lines = document.build();
        let data = data_lines(&lines);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].len(), 512 + 2);
    }

    #[test]
    fn test_zero_length_attachment() {
        let mut document = MimeDocumentBuilder::default();
        document.add_attachment("blob.bin", b"");

        let lines = document.build();
        assert!(lines.contains(&" filename=blob.bin\r\n".to_string()));
        // No data lines: blank separator directly followed by blank + boundary.
        let data = data_lines(&lines);
        assert!(data.is_empty());
        assert_eq!(lines.last().unwrap(), &open_boundary_line());
    }

    #[test]
    fn test_remove_message_first_match() {
        let mut document = MimeDocumentBuilder::default();
        document.add_message("keep");
        document.add_message("drop");
        document.add_message("drop");
        document.remove_message("drop");

        let lines = document.build();
        let remaining = lines.iter().filter(|line| **line == "drop\r\n").count();
        assert_eq!(remaining, 1);
        assert!(lines.contains(&"keep\r\n".to_string()));
    }

    #[test]
    fn test_remove_message_no_match_is_noop() {
        let mut document = MimeDocumentBuilder::default();
        document.add_message("hi");
        document.remove_message("absent");
        assert!(lines_contain(&document.build(), "hi\r\n"));
    }

    #[test]
    fn test_remove_attachment_by_name() {
        let mut document = MimeDocumentBuilder::default();
        document.add_attachment("a.bin", b"first");
        document.add_attachment("a.bin", b"second");
        document.remove_attachment("a.bin");
        document.remove_attachment("missing.bin");

        let lines = document.build();
        // First insertion removed; the second one's contents survive.
        let joined: String = lines.concat();
        assert!(joined.contains(&base64::encode(b"second")));
        assert!(!joined.contains(&base64::encode(b"first")));
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut document = MimeDocumentBuilder::new("test bot");
        document.add_message("hi");
        document.add_attachment("test.txt", b"contents");
        assert_eq!(document.build(), document.build());
    }

    #[test]
    fn test_build_reflects_later_mutation() {
        let mut document = MimeDocumentBuilder::default();
        document.add_message("hi");
        let before = document.build();
        document.add_message("again");
        let after = document.build();
        assert!(after.len() > before.len());
    }

    fn lines_contain(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line == needle)
    }
}
