use crate::client::Summarizer;
use crate::encoder;
use crate::prompt::select_prompt;
use crate::types::{
    BatchPhase, DetailLevel, FileOutcome, Result, SelectedFile, SummarizerError, SummaryResult,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Drives one batch of files through encode → prompt → summarize, emitting
/// one outcome per file in selection order.
///
/// Files are processed strictly sequentially: one request resolves or fails
/// before the next begins. A failure for one file never halts the batch; the
/// file gets a `Failure` result and the loop moves on.
pub struct BatchProcessor {
    summarizer: Arc<dyn Summarizer>,
    phase: Arc<RwLock<BatchPhase>>,
}

impl BatchProcessor {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            summarizer,
            phase: Arc::new(RwLock::new(BatchPhase::Idle)),
        }
    }

    /// Current lifecycle phase. UI adapters disable selection controls while
    /// this reports `Running`.
    pub async fn phase(&self) -> BatchPhase {
        *self.phase.read().await
    }

    /// Run one batch. The detail level is fixed for the whole run; every
    /// outcome is passed to `on_outcome` as soon as it is known, and the full
    /// ordered list is returned at the end.
    ///
    /// An empty selection is a no-op: zero outcomes, zero service calls.
    /// A batch-level init failure (bad credential setup) returns an error
    /// with zero outcomes; the phase still ends at `Completed`.
    pub async fn run<F>(
        &self,
        files: &[SelectedFile],
        level: DetailLevel,
        mut on_outcome: F,
    ) -> Result<Vec<FileOutcome>>
    where
        F: FnMut(&FileOutcome),
    {
        {
            let mut phase = self.phase.write().await;
            if *phase == BatchPhase::Running {
                return Err(SummarizerError::BatchInit(
                    "a batch is already running".to_string(),
                ));
            }
            *phase = BatchPhase::Running;
        }

        let result = self.run_inner(files, level, &mut on_outcome).await;

        *self.phase.write().await = BatchPhase::Completed;
        result
    }

    async fn run_inner<F>(
        &self,
        files: &[SelectedFile],
        level: DetailLevel,
        on_outcome: &mut F,
    ) -> Result<Vec<FileOutcome>>
    where
        F: FnMut(&FileOutcome),
    {
        // An empty selection never touches the service, so it cannot surface
        // a credential failure either.
        if files.is_empty() {
            info!("Empty selection, nothing to process");
            return Ok(Vec::new());
        }

        self.summarizer.ensure_ready()?;

        info!(
            "Processing batch of {} files at {:?} detail via {}",
            files.len(),
            level,
            self.summarizer.summarizer_name()
        );

        // One prompt per batch, shared by every file.
        let prompt = select_prompt(level);

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let result = self.process_file(file, &prompt).await;
            let outcome = FileOutcome {
                file_name: file.name.clone(),
                result,
            };
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        info!(
            "Batch complete: {} succeeded, {} failed",
            outcomes.iter().filter(|o| o.result.is_success()).count(),
            outcomes.iter().filter(|o| !o.result.is_success()).count()
        );

        Ok(outcomes)
    }

    async fn process_file(&self, file: &SelectedFile, prompt: &str) -> SummaryResult {
        let fragment = match encoder::encode(file).await {
            Ok(fragment) => fragment,
            Err(e) => {
                warn!("Failed to encode {}: {}", file.name, e);
                return SummaryResult::Failure {
                    reason: e.to_string(),
                };
            }
        };

        match self.summarizer.summarize(prompt, &fragment).await {
            Ok(text) => SummaryResult::Success { text },
            Err(e) => {
                warn!("Failed to summarize {}: {}", file.name, e);
                SummaryResult::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }
}
