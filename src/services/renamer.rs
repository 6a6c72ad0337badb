//! Batch renaming of mill sheet PDFs through the extraction pipeline.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::AppError;
use crate::models::ExtractionResult;
use crate::services::naming::{generate_filename, move_file, unique_path};
use crate::services::ClaudeClient;

#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    /// Directory to move renamed files into; each file's own directory when unset.
    pub output_dir: Option<PathBuf>,
    /// Plan names without moving anything.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct RenameOutcome {
    pub source: PathBuf,
    pub result: Result<PathBuf>,
}

#[derive(Debug, Default)]
pub struct RenameReport {
    pub outcomes: Vec<RenameOutcome>,
}

impl RenameReport {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Fails when any file failed.
    pub fn into_result(self) -> Result<()> {
        let failures = self.failures();
        if failures > 0 {
            bail!("{} of {} files failed", failures, self.outcomes.len());
        }
        Ok(())
    }
}

/// Extracts the fields of one PDF and moves it to its generated name.
///
/// Returns the target path (the planned one on a dry run).
pub async fn rename_pdf(
    client: &ClaudeClient,
    api_key: &str,
    path: &Path,
    options: &RenameOptions,
) -> Result<PathBuf> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let value = client
        .extract(STANDARD.encode(&bytes), api_key)
        .await
        .map_err(describe)?;

    let name = generate_filename(&ExtractionResult::from_value(&value));
    let dir = options
        .output_dir
        .as_deref()
        .or_else(|| path.parent())
        .unwrap_or_else(|| Path::new("."));
    let target = unique_path(&dir.join(name));

    if !options.dry_run {
        move_file(path, &target)
            .with_context(|| format!("Failed to move {} to {}", path.display(), target.display()))?;
    }

    tracing::info!(
        source = %path.display(),
        target = %target.display(),
        dry_run = options.dry_run,
        "Mill sheet renamed"
    );

    Ok(target)
}

/// Renames every file in order; one failure does not stop the rest.
///
/// `on_done` sees each outcome as it completes, with its index and the total.
pub async fn rename_all<F>(
    client: &ClaudeClient,
    api_key: &str,
    files: &[PathBuf],
    options: &RenameOptions,
    mut on_done: F,
) -> RenameReport
where
    F: FnMut(usize, usize, &RenameOutcome),
{
    let mut report = RenameReport::default();

    for (idx, path) in files.iter().enumerate() {
        let result = rename_pdf(client, api_key, path, options).await;
        if let Err(e) = &result {
            tracing::warn!(source = %path.display(), error = %e, "Rename failed");
        }

        let outcome = RenameOutcome {
            source: path.clone(),
            result,
        };
        on_done(idx, files.len(), &outcome);
        report.outcomes.push(outcome);
    }

    report
}

fn describe(err: AppError) -> anyhow::Error {
    match &err {
        AppError::Provider { body, .. } => anyhow!("{}: {}", err, body),
        _ => anyhow!(err),
    }
}
