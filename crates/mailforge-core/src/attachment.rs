//! Attachment loading.

use crate::error::{Error, Result};
use std::path::Path;

/// A file attachment: the path it was loaded from and its full contents.
///
/// Contents are held entirely in memory; the base64 expansion during document
/// building costs roughly another 4/3 of the size on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    contents: Vec<u8>,
}

impl Attachment {
    /// Reads the whole file at `path` into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttachmentUnavailable`] if the file cannot be read.
    /// Nothing is mutated on failure; the caller's document never sees a
    /// half-read attachment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|source| Error::AttachmentUnavailable {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            file_name: path.display().to_string(),
            contents,
        })
    }

    /// Creates an attachment from in-memory bytes.
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
        }
    }

    /// The file name as given; directory components are stripped later, when
    /// the document emits the part.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The raw contents.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
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

    #[test]
    fn test_from_bytes() {
        let attachment = Attachment::from_bytes("report.pdf", vec![1, 2, 3]);
        assert_eq!(attachment.file_name(), "report.pdf");
        assert_eq!(attachment.contents(), &[1, 2, 3]);
    }

    #[test]
    fn test_missing_file_carries_path() {
        let err = Attachment::from_file("/definitely/not/here.bin").unwrap_err();
        match err {
            Error::AttachmentUnavailable { path, .. } => {
                assert_eq!(path, "/definitely/not/here.bin");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_round_trip_through_disk() {
        let path = std::env::temp_dir().join("mailforge-attachment-test.bin");
        std::fs::write(&path, b"contents").unwrap();

        let attachment = Attachment::from_file(&path).unwrap();
        assert_eq!(attachment.contents(), b"contents");
        assert!(attachment.file_name().ends_with("mailforge-attachment-test.bin"));

        std::fs::remove_file(&path).unwrap();
    }
}
