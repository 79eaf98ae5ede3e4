use bytes::Bytes;
use serde::Serialize;

use crate::decode::TextEncoding;

/// An upload as received from the transport layer.
#[derive(Debug, Clone)]
pub struct RawUpload {
    /// Client-supplied file name, possibly with a directory prefix.
    pub file_name: String,
    /// Raw file bytes.
    pub content: Bytes,
}

impl RawUpload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// A validated, decoded upload ready for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedFile {
    pub file_name: String,
    #[serde(skip)]
    pub encoding: TextEncoding,
    pub text: String,
}

/// Extension of `file_name`, lower-cased and including the leading dot.
///
/// Only the last path segment is considered. Returns an empty string when
/// there is no extension (`"notes"`, `"archive."`).
pub fn file_extension(file_name: &str) -> String {
    let segment = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    match segment.rfind('.') {
        Some(idx) if idx + 1 < segment.len() => segment[idx..].to_lowercase(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_cases() {
        assert_eq!(file_extension("note.txt"), ".txt");
        assert_eq!(file_extension("NOTE.TXT"), ".txt");
        assert_eq!(file_extension("archive.tar.log"), ".log");
        assert_eq!(file_extension("dir.d/notes"), "");
        assert_eq!(file_extension("C:\\logs\\app.Log"), ".log");
        assert_eq!(file_extension("trailing."), "");
        assert_eq!(file_extension("noext"), "");
    }
}
