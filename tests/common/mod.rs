//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use quarry::{EngineConfig, SearchEngine, StopWords};
use serde_json::json;

// Re-export canonical test utilities from quarry::testing
pub use quarry::testing::{doc_id, example_indexes, make_doc};

/// One article for `write_corpus`.
pub struct Article<'a> {
    pub id: &'a str,
    pub title: &'a str,
    /// `(first, last)` pairs
    pub authors: &'a [(&'a str, &'a str)],
    pub paragraphs: &'a [&'a str],
}

/// Write articles as CORD-19 JSON files, one per article, named by id.
pub fn write_corpus(dir: &Path, articles: &[Article<'_>]) {
    for article in articles {
        let value = json!({
            "paper_id": article.id,
            "metadata": {
                "title": article.title,
                "authors": article.authors.iter().map(|(first, last)| json!({
                    "first": first,
                    "middle": [],
                    "last": last,
                    "suffix": "",
                    "affiliation": {},
                    "email": ""
                })).collect::<Vec<_>>(),
            },
            "abstract": [],
            "body_text": article.paragraphs.iter().map(|text| json!({
                "text": text,
                "cite_spans": [],
                "ref_spans": [],
                "section": "Body"
            })).collect::<Vec<_>>(),
            "bib_entries": {},
            "ref_entries": {},
            "back_matter": []
        });
        let path = dir.join(format!("{}.json", article.id));
        fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }
}

/// A small corpus with overlapping vocabulary and a shared author.
pub fn sample_articles() -> Vec<(String, &'static str, Vec<(&'static str, &'static str)>, Vec<&'static str>)> {
    vec![
        (
            doc_id(1).to_string(),
            "Membrane fusion of enveloped viruses",
            vec![("Wei", "Liu"), ("Ana", "Garcia")],
            vec![
                "Enveloped viruses enter host cells through membrane fusion.",
                "The fusion protein rearranges during entry.",
            ],
        ),
        (
            doc_id(2).to_string(),
            "Cell barrier function in the lung",
            vec![("Sam", "Okafor")],
            vec!["The epithelial barrier protects the lung. Barrier cells renew quickly."],
        ),
        (
            doc_id(3).to_string(),
            "Coronavirus replication in host cells",
            vec![("Wei", "Liu")],
            vec![
                "Coronavirus replication takes place in the host cell cytoplasm.",
                "Replication requires membrane remodeling.",
            ],
        ),
        (
            doc_id(4).to_string(),
            "",
            vec![],
            vec!["Influenza virus infection of the airway."],
        ),
    ]
}

/// Write `sample_articles` to `dir`.
pub fn write_sample_corpus(dir: &Path) {
    let articles = sample_articles();
    let borrowed: Vec<Article<'_>> = articles
        .iter()
        .map(|(id, title, authors, paragraphs)| Article {
            id,
            title,
            authors,
            paragraphs,
        })
        .collect();
    write_corpus(dir, &borrowed);
}

/// Engine with the built-in stop words and default config.
pub fn engine() -> SearchEngine {
    SearchEngine::new(EngineConfig::default(), StopWords::builtin())
}
