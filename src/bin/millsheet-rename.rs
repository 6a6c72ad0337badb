//! Batch renamer for mill sheet PDFs.
//!
//! Sends each PDF through the same extraction pipeline as the HTTP service
//! and moves it to `date_spec_size_charge_no_project_maker.pdf`.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use millsheet::{
    services::{
        naming::collect_pdfs,
        renamer::{rename_all, RenameOptions},
        ClaudeClient,
    },
    Config,
};

#[derive(Debug, Parser)]
#[command(name = "millsheet-rename", version, about = "Rename mill sheet PDFs from their extracted fields")]
struct Cli {
    /// PDF files or directories (searched recursively)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Directory to move renamed files into (defaults to each file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the planned names without moving anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if cli.api_key.trim().is_empty() {
        bail!("API key is empty");
    }
    if let Some(dir) = &cli.output_dir {
        if !dir.is_dir() {
            bail!("Output directory does not exist: {}", dir.display());
        }
    }

    let files = collect_pdfs(&cli.inputs);
    if files.is_empty() {
        bail!("No PDF files found");
    }

    let config = Config::from_env()?;
    let client = ClaudeClient::new(&config)?;
    let options = RenameOptions {
        output_dir: cli.output_dir,
        dry_run: cli.dry_run,
    };

    let report = rename_all(&client, &cli.api_key, &files, &options, |idx, total, outcome| {
        println!("[{}/{}] {}", idx + 1, total, outcome.source.display());
        match &outcome.result {
            Ok(target) => {
                let verb = if options.dry_run { "would move to" } else { "done" };
                println!("  {} {}", verb, target.display());
            }
            Err(e) => eprintln!("  error: {:#}", e),
        }
    })
    .await;

    report.into_result()
}
