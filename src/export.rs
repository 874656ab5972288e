use crate::types::{FileOutcome, Result, SummaryResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Fixed naming convention for exported summaries: the original file name is
/// kept in full, extension included.
pub fn summary_file_name(original_name: &str) -> String {
    format!("summary-{}.txt", original_name)
}

/// Write one summary as a UTF-8 text file under `dir` and return its path.
/// The file contains exactly the raw summary text.
pub async fn write_summary(dir: &Path, original_name: &str, text: &str) -> Result<PathBuf> {
    let path = dir.join(summary_file_name(original_name));
    tokio::fs::write(&path, text).await?;
    info!("Exported summary to {}", path.display());
    Ok(path)
}

/// Export every successful summary in `outcomes` under `dir`, returning how
/// many files were written. Exports are independent: a failed write is
/// logged and the remaining summaries are still exported.
pub async fn export_summaries(dir: &Path, outcomes: &[FileOutcome]) -> usize {
    let mut exported = 0;
    for outcome in outcomes {
        if let SummaryResult::Success { text } = &outcome.result {
            match write_summary(dir, &outcome.file_name, text).await {
                Ok(_) => exported += 1,
                Err(e) => warn!("Failed to export summary for {}: {}", outcome.file_name, e),
            }
        }
    }
    exported
}
