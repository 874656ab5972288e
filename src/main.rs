use anyhow::Context;
use clap::Parser;
use doc_summarizer::{
    BatchProcessor, ClientConfig, DetailLevel, FileOutcome, GeminiClient, SelectedFile,
    SummaryResult,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Batch summarizer for tender application documents (PDF, TXT, DOCX).
#[derive(Debug, Parser)]
#[command(name = "doc-summarizer", version)]
struct Cli {
    /// Files to summarize
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Summary detail level, applied to the whole batch
    #[arg(long, value_enum, default_value_t = DetailLevel::Medium)]
    detail: DetailLevel,

    /// Directory where exported summaries are written
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Model identifier for the generative language service
    #[arg(long, default_value = "gemini-2.5-flash")]
    model: String,

    /// API key for the generative language service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Print summaries only, skip writing summary files
    #[arg(long)]
    no_export: bool,
}

/// Map a file extension to the declared MIME type. The `.pdf/.txt/.docx`
/// set is a hint, not a gate: anything else is declared as generic binary
/// and processed all the same.
fn mime_type_for(path: &Path) -> &'static str {
    match extension_of(path).as_deref() {
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

fn file_icon(path: &Path) -> &'static str {
    match extension_of(path).as_deref() {
        Some("pdf") => "📄",
        Some("docx") => "📝",
        Some("txt") => "🗒️",
        _ => "📁",
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn selected_file_from(path: &Path) -> SelectedFile {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| path.display().to_string());
    SelectedFile::new(name, mime_type_for(path), path)
}

fn render_outcome(outcome: &FileOutcome) {
    println!("\n── {} ──", outcome.file_name);
    match &outcome.result {
        SummaryResult::Success { text } => println!("{}", text),
        // Generic localized message; the underlying reason goes to the log.
        SummaryResult::Failure { .. } => println!("Greška pri obradi ove datoteke."),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let files: Vec<SelectedFile> = cli.files.iter().map(|p| selected_file_from(p)).collect();

    println!("Odabrane datoteke:");
    for (path, file) in cli.files.iter().zip(&files) {
        println!("  {} {}", file_icon(path), file.name);
        if mime_type_for(path) == "application/octet-stream" {
            warn!(
                "{}: extension is not one of .pdf/.txt/.docx, sending as generic binary",
                file.name
            );
        }
    }

    let client = GeminiClient::new(ClientConfig::new(cli.api_key.clone()).with_model(cli.model.clone()));
    let processor = BatchProcessor::new(Arc::new(client));

    let outcomes = match processor.run(&files, cli.detail, render_outcome).await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("Došlo je do neočekivane greške prilikom obrade datoteka. Molimo pokušajte ponovo.");
            return Err(e).context("batch failed before any file was processed");
        }
    };

    if !cli.no_export {
        tokio::fs::create_dir_all(&cli.output_dir)
            .await
            .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;

        doc_summarizer::export_summaries(&cli.output_dir, &outcomes).await;
    }

    info!(
        "Finished: {}/{} files summarized",
        outcomes.iter().filter(|o| o.result.is_success()).count(),
        outcomes.len()
    );

    Ok(())
}
