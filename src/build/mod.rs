// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus ingestion: a directory of CORD-19 JSON files in, documents out.
//!
//! Unreadable or malformed files are skipped with a warning and listed in the
//! `LoadReport`; only failing to read the directory itself is an error.

pub mod document;
pub mod metadata;
pub mod parallel;

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::types::Document;

pub use document::{parse_document, PaperFile, NOT_AVAILABLE};
pub use metadata::{load_metadata, read_metadata, ArticleMeta, MetadataTable};
pub use parallel::load_documents;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// `*.json` files found in the directory
    pub files: usize,
    pub loaded: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Every `*.json` regular file directly under `dir`, sorted by path.
///
/// Subdirectories are not descended into. Entries that can't be read are
/// skipped with a warning.
pub fn corpus_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every article under `dir`, sorted by document id.
pub fn load_corpus(dir: &Path) -> Result<(Vec<Document>, LoadReport)> {
    let paths = corpus_files(dir)?;
    let loaded = parallel::load_documents(&paths);
    Ok(collect(paths.len(), loaded))
}

/// `load_corpus` with a progress bar on stderr.
#[cfg(feature = "parallel")]
pub fn load_corpus_with_progress(dir: &Path) -> Result<(Vec<Document>, LoadReport)> {
    let paths = corpus_files(dir)?;

    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(progress_style());
    progress.set_prefix("Loading");
    progress.set_message("articles...");

    let loaded = parallel::load_documents_with_progress(&paths, &progress);
    let (documents, report) = collect(paths.len(), loaded);
    progress.finish_with_message(format!("loaded {} articles", report.loaded));
    Ok((documents, report))
}

#[cfg(not(feature = "parallel"))]
pub fn load_corpus_with_progress(dir: &Path) -> Result<(Vec<Document>, LoadReport)> {
    load_corpus(dir)
}

#[cfg(feature = "parallel")]
fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

fn collect(files: usize, loaded: Vec<parallel::Loaded>) -> (Vec<Document>, LoadReport) {
    let mut report = LoadReport {
        files,
        ..LoadReport::default()
    };
    let mut documents = Vec::with_capacity(loaded.len());
    for item in loaded {
        match item {
            Ok(doc) => documents.push(doc),
            Err(skipped) => report.skipped.push(skipped),
        }
    }
    documents.sort_by(|a, b| a.id.cmp(&b.id));
    report.loaded = documents.len();

    tracing::info!(
        files = report.files,
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "loaded corpus"
    );
    (documents, report)
}
