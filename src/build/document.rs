// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CORD-19 article files.
//!
//! Only the fields the engine uses are modeled; serde ignores the rest
//! (`abstract`, `bib_entries`, `ref_entries`, affiliations, ...).

use serde::Deserialize;

use crate::types::{DocId, Document};

/// Placeholder for a missing title or author list.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Deserialize, Clone, Debug)]
pub struct PaperFile {
    pub paper_id: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub body_text: Vec<Paragraph>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<AuthorName>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AuthorName {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

impl AuthorName {
    fn full_name(&self) -> String {
        match (self.first.trim(), self.last.trim()) {
            ("", last) => last.to_string(),
            (first, "") => first.to_string(),
            (first, last) => format!("{} {}", first, last),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Paragraph {
    #[serde(default)]
    pub text: String,
}

impl PaperFile {
    pub fn into_document(self) -> Document {
        let title = match self.metadata.title.trim() {
            "" => NOT_AVAILABLE.to_string(),
            t => t.to_string(),
        };

        let (authors, authors_surnames) = if self.metadata.authors.is_empty() {
            (vec![NOT_AVAILABLE.to_string()], vec![NOT_AVAILABLE.to_string()])
        } else {
            self.metadata
                .authors
                .iter()
                .map(|a| (a.full_name(), a.last.trim().to_string()))
                .unzip()
        };

        let body_text = self
            .body_text
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Document {
            id: DocId::new(self.paper_id),
            title,
            authors,
            authors_surnames,
            body_text,
        }
    }
}

/// Parse one article file's contents.
pub fn parse_document(json: &str) -> serde_json::Result<Document> {
    serde_json::from_str::<PaperFile>(json).map(PaperFile::into_document)
}
