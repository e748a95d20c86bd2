// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the engine.
//!
//! Only genuinely fatal conditions are errors. Unknown terms, unknown authors
//! and missing index files are ordinary outcomes and show up as `Option`s or
//! `missing_*` fields instead (see `query::Evaluation`, `engine::RestoreReport`).

use std::path::PathBuf;

use crate::query::QueryError;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON config, document or snapshot could not be parsed
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The metadata CSV could not be read
    #[error("invalid CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Configuration is present but unusable
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The query could not be turned into anything evaluable
    #[error("query error: {0}")]
    Query(#[from] QueryError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Error::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}
