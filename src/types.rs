use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file the user selected for summarization.
///
/// The handle keeps the declared MIME type alongside the path; the bytes are
/// only read when the encoder runs, so an unreadable file surfaces as a
/// per-file error instead of failing selection.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            path: path.into(),
        }
    }
}

/// Verbosity of the requested summary. One level applies to a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Brief,
    #[default]
    Medium,
    Detailed,
}

impl DetailLevel {
    /// Parse a detail level, falling back to `Medium` for anything
    /// unrecognized. Croatian option values are accepted alongside the
    /// English names.
    pub fn from_str_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "brief" | "kratak" => Self::Brief,
            "detailed" | "detaljan" => Self::Detailed,
            _ => Self::Medium,
        }
    }
}

/// A file's content encoded for attachment to a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentFragment {
    /// Decoded text of a `text/plain` file.
    Text { value: String },
    /// Base64-encoded bytes of any other file type.
    InlineBinary { mime_type: String, base64: String },
}

/// Outcome of summarizing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum SummaryResult {
    Success { text: String },
    Failure { reason: String },
}

impl SummaryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One emission of the batch processor: the result for a single file,
/// keyed by the file's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub file_name: String,
    pub result: SummaryResult,
}

/// Lifecycle of a batch run. `Running` is the window during which the
/// detail level and file selection must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPhase {
    #[default]
    Idle,
    Running,
    Completed,
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    #[error("failed to read file '{name}': {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service error (HTTP {status}): {body}")]
    Service { status: u16, body: String },

    #[error("malformed service response: {0}")]
    MalformedResponse(String),

    #[error("batch initialization failed: {0}")]
    BatchInit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SummarizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_level_defaults_to_medium() {
        assert_eq!(DetailLevel::default(), DetailLevel::Medium);
    }

    #[test]
    fn lossy_parse_accepts_both_vocabularies() {
        assert_eq!(DetailLevel::from_str_lossy("brief"), DetailLevel::Brief);
        assert_eq!(DetailLevel::from_str_lossy("kratak"), DetailLevel::Brief);
        assert_eq!(DetailLevel::from_str_lossy("detaljan"), DetailLevel::Detailed);
        assert_eq!(DetailLevel::from_str_lossy("Detailed"), DetailLevel::Detailed);
        assert_eq!(DetailLevel::from_str_lossy("srednji"), DetailLevel::Medium);
    }

    #[test]
    fn lossy_parse_falls_back_to_medium() {
        assert_eq!(DetailLevel::from_str_lossy(""), DetailLevel::Medium);
        assert_eq!(DetailLevel::from_str_lossy("verbose"), DetailLevel::Medium);
        assert_eq!(DetailLevel::from_str_lossy("???"), DetailLevel::Medium);
    }

    #[test]
    fn read_error_names_the_file() {
        let err = SummarizerError::Read {
            name: "ponuda.pdf".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("ponuda.pdf"));
    }
}
