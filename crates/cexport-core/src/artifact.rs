//! The downloadable artifact: serialized payload plus its save metadata.

use crate::checksum;

/// Fixed name of the saved export.
pub const ARTIFACT_FILENAME: &str = "data.txt";

/// Declared type of the saved export.
pub const ARTIFACT_MIME: &str = "text/plain";

/// Serialized export ready to hand to a downloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    content: Vec<u8>,
    filename: &'static str,
    mime: &'static str,
}

impl DownloadArtifact {
    /// Wrap the pretty-printed payload text as `data.txt` / `text/plain`.
    pub fn from_text(text: String) -> Self {
        Self {
            content: text.into_bytes(),
            filename: ARTIFACT_FILENAME,
            mime: ARTIFACT_MIME,
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn filename(&self) -> &str {
        self.filename
    }

    pub fn mime(&self) -> &str {
        self.mime
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Lowercase hex SHA-256 of the content.
    pub fn sha256(&self) -> String {
        checksum::sha256_bytes(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_sets_fixed_metadata() {
        let a = DownloadArtifact::from_text("{\n  \"a\": 1\n}".to_string());
        assert_eq!(a.filename(), "data.txt");
        assert_eq!(a.mime(), "text/plain");
        assert_eq!(a.content(), b"{\n  \"a\": 1\n}");
        assert_eq!(a.len(), 12);
        assert!(!a.is_empty());
    }

    #[test]
    fn digest_is_content_digest() {
        let a = DownloadArtifact::from_text("hello\n".to_string());
        assert_eq!(
            a.sha256(),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }
}
