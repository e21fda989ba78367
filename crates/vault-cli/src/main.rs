//! Vault CLI: submit local files to the intake pipeline.
//!
//! Set VAULT_CLAMAV_HOST/VAULT_CLAMAV_PORT to scan through a ClamAV
//! daemon; without them content passes through unscanned (marked clean).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use vault_cli::{content_type_for, format_size, init_tracing};
use vault_core::models::FileSubmission;
use vault_core::IntakeConfig;
use vault_intake::{
    build_incident_report, fingerprint, ClamAvScanner, IntakePipeline, PassthroughScanner, Scanner,
};

#[derive(Parser)]
#[command(name = "vault", about = "LLM-Vault intake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit files to the intake pipeline and print each verdict
    Scan {
        /// Paths of the files to scan
        files: Vec<PathBuf>,
        /// Print the incident report after scanning
        #[arg(long)]
        report: bool,
    },
    /// Print the content fingerprint of a single file
    Fingerprint {
        /// Path of the file to fingerprint
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan { files, report } => scan(files, report).await,
        Commands::Fingerprint { file } => {
            let data = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            println!("{}  {}", fingerprint(&data), file.display());
            Ok(())
        }
    }
}

async fn scan(files: Vec<PathBuf>, report: bool) -> anyhow::Result<()> {
    anyhow::ensure!(!files.is_empty(), "No files given");

    let batch = files
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unnamed")
                .to_string();
            let data = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(FileSubmission::new(name.clone(), content_type_for(&name), data))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let pipeline = IntakePipeline::new(IntakeConfig::from_env(), scanner_from_env());
    pipeline
        .submit(batch)
        .await
        .context("Batch submission rejected")?;

    let mut poisoned = 0usize;
    for item in pipeline.queue().await {
        if let Some(outcome) = item.result {
            if outcome.poisoned {
                poisoned += 1;
                println!(
                    "POISONED  {}  [{} {:.0}%]  {}",
                    item.file_name,
                    outcome.technique,
                    outcome.confidence * 100.0,
                    outcome.reason
                );
            } else {
                println!(
                    "CLEAN     {}  ({})  {}",
                    item.file_name,
                    format_size(item.size_bytes),
                    &outcome.hash[..12]
                );
            }
        } else if let Some(message) = item.error_message {
            println!("ERROR     {}  {}", item.file_name, message);
        } else {
            // submit has returned, so every item is terminal
            println!("{}   {}", item.status, item.file_name);
        }
    }

    if report {
        println!();
        println!(
            "{}",
            build_incident_report(&pipeline.ledger().await, pipeline.is_active())
        );
    }

    anyhow::ensure!(poisoned == 0, "{poisoned} poisoned file(s) detected");
    Ok(())
}

fn scanner_from_env() -> Arc<dyn Scanner> {
    if let Ok(host) = std::env::var("VAULT_CLAMAV_HOST") {
        let port = std::env::var("VAULT_CLAMAV_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3310);
        tracing::info!(host = %host, port = port, "Using ClamAV scan backend");
        return Arc::new(ClamAvScanner::new(host, port));
    }
    Arc::new(PassthroughScanner::new())
}
