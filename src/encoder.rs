use crate::types::{ContentFragment, Result, SelectedFile, SummarizerError};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

/// Read a selected file and encode it as a request-ready content fragment.
///
/// The branch is driven purely by the declared MIME type: `text/plain` files
/// become a decoded text fragment, every other type becomes base64-encoded
/// inline data. A mismatched extension/MIME pair is not an error; the file is
/// simply treated as binary.
pub async fn encode(file: &SelectedFile) -> Result<ContentFragment> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|source| SummarizerError::Read {
            name: file.name.clone(),
            source,
        })?;

    debug!("Encoded {} ({} bytes, {})", file.name, bytes.len(), file.mime_type);

    if file.mime_type == "text/plain" {
        // Mirrors a text-mode read: invalid UTF-8 degrades to replacement
        // characters instead of failing the file.
        Ok(ContentFragment::Text {
            value: String::from_utf8_lossy(&bytes).into_owned(),
        })
    } else {
        Ok(ContentFragment::InlineBinary {
            mime_type: file.mime_type.clone(),
            base64: STANDARD.encode(&bytes),
        })
    }
}
