//! File naming for renamed mill sheets.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::models::{ExtractionResult, FIELD_NAMES};

/// Placeholder for a field the model could not read.
pub const UNKNOWN_PART: &str = "不明";

static RE_FORBIDDEN_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"|?*]"#).expect("forbidden char pattern compiles"));
static RE_WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

pub fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\'], "_");
    let name = RE_FORBIDDEN_CHARS.replace_all(&name, "");
    RE_WHITESPACE_RUN.replace_all(&name, " ").trim().to_string()
}

/// `date_spec_size_charge_no_project_maker.pdf`, sanitized.
pub fn generate_filename(result: &ExtractionResult) -> String {
    let parts: Vec<&str> = FIELD_NAMES
        .iter()
        .map(|name| match result.get(name) {
            Some(value) if !value.is_empty() => value,
            _ => UNKNOWN_PART,
        })
        .collect();

    sanitize_filename(&format!("{}.pdf", parts.join("_")))
}

/// First of `path`, `stem (1).ext`, `stem (2).ext`, ... that does not exist.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    (1..)
        .map(|i| parent.join(format!("{stem} ({i}){ext}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Expands directories into the PDFs below them, keeping first-seen order.
pub fn collect_pdfs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name().into_iter() {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_pdf(entry.path()) => {
                        let path = entry.into_path();
                        if !files.contains(&path) {
                            files.push(path);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "Skipping unreadable entry"),
                }
            }
        } else if is_pdf(input) && !files.contains(input) {
            files.push(input.clone());
        }
    }

    files
}

/// Moves a file, falling back to copy and delete across filesystems.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(e),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}
