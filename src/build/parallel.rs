// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel document loading.
//!
//! Reading and parsing article files is the slow part of building an index
//! and every file is independent, so with the `parallel` feature the files
//! are parsed on the rayon pool. Index insertion stays on the calling thread:
//! results are collected and sorted before anything touches the engine.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::types::Document;

use super::document::parse_document;
use super::SkippedFile;

/// Outcome of loading one file.
pub(super) type Loaded = Result<Document, SkippedFile>;

fn load_one(path: &Path) -> Loaded {
    let skip = |reason: String| {
        tracing::warn!(path = %path.display(), %reason, "skipping corpus file");
        SkippedFile {
            path: path.to_path_buf(),
            reason,
        }
    };
    let content = fs::read_to_string(path).map_err(|e| skip(format!("read failed: {}", e)))?;
    parse_document(&content).map_err(|e| skip(format!("invalid JSON: {}", e)))
}

/// Parse every file in `paths`. Failures come back as `Err` entries.
#[cfg(feature = "parallel")]
pub fn load_documents(paths: &[PathBuf]) -> Vec<Loaded> {
    paths.par_iter().map(|p| load_one(p)).collect()
}

#[cfg(not(feature = "parallel"))]
pub fn load_documents(paths: &[PathBuf]) -> Vec<Loaded> {
    paths.iter().map(|p| load_one(p)).collect()
}

/// `load_documents` with a progress bar ticking once per file.
#[cfg(feature = "parallel")]
pub fn load_documents_with_progress(paths: &[PathBuf], progress: &ProgressBar) -> Vec<Loaded> {
    let counter = AtomicUsize::new(0);
    let total = paths.len();

    paths
        .par_iter()
        .map(|path| {
            let loaded = load_one(path);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 100 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            loaded
        })
        .collect()
}
