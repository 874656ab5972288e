pub mod batch;
pub mod client;
pub mod encoder;
pub mod export;
pub mod prompt;
pub mod types;

pub use batch::BatchProcessor;
pub use client::{ClientConfig, GeminiClient, MockReply, MockSummarizer, Summarizer};
pub use encoder::encode;
pub use export::{export_summaries, summary_file_name, write_summary};
pub use prompt::select_prompt;
pub use types::*;
