//! Corpus loading from a directory of CORD-19 files.

use super::common::{doc_id, write_corpus, write_sample_corpus, Article};
use quarry::build::{load_corpus, load_metadata, NOT_AVAILABLE};
use quarry::PREVIEW_WORDS;
use std::fs;

#[test]
fn test_sample_corpus_loads_sorted_by_id() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path());

    let (docs, report) = load_corpus(dir.path()).unwrap();
    assert_eq!(report.files, 4);
    assert_eq!(report.loaded, 4);
    assert!(report.skipped.is_empty());

    let ids: Vec<String> = docs.iter().map(|d| d.id.to_string()).collect();
    let expected: Vec<String> = (1..=4).map(|n| doc_id(n).to_string()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_paragraphs_are_joined_and_authors_split() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path());

    let (docs, _) = load_corpus(dir.path()).unwrap();
    let first = &docs[0];
    assert_eq!(first.title, "Membrane fusion of enveloped viruses");
    assert_eq!(first.authors, vec!["Wei Liu", "Ana Garcia"]);
    assert_eq!(first.authors_surnames, vec!["Liu", "Garcia"]);
    assert_eq!(
        first.body_text,
        "Enveloped viruses enter host cells through membrane fusion. \
         The fusion protein rearranges during entry."
    );
}

#[test]
fn test_missing_metadata_gets_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path());

    let (docs, _) = load_corpus(dir.path()).unwrap();
    let untitled = &docs[3];
    assert_eq!(untitled.title, NOT_AVAILABLE);
    assert_eq!(untitled.authors, vec![NOT_AVAILABLE]);
    assert_eq!(untitled.authors_surnames, vec![NOT_AVAILABLE]);
}

#[test]
fn test_bad_files_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        dir.path(),
        &[Article {
            id: "good",
            title: "Fine",
            authors: &[("A", "Smith")],
            paragraphs: &["cell"],
        }],
    );
    fs::write(dir.path().join("truncated.json"), r#"{"paper_id": "x", "metadata": "#).unwrap();
    fs::write(dir.path().join("README.md"), "# corpus").unwrap();
    fs::create_dir(dir.path().join("pdf_json")).unwrap();

    let (docs, report) = load_corpus(dir.path()).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(report.files, 2);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("truncated.json"));
}

#[test]
fn test_empty_directory_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, report) = load_corpus(dir.path()).unwrap();
    assert!(docs.is_empty());
    assert_eq!(report.files, 0);
}

#[test]
fn test_metadata_csv_attaches_to_search_results() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path());
    let csv_path = dir.path().join("metadata.csv");
    fs::write(
        &csv_path,
        format!(
            "cord_uid,sha,source_x,title,doi,pmcid,pubmed_id,license,abstract,publish_time,authors,journal\n\
             u1,{},PMC,T,,,,,,2020-02-14,,Journal of Virology\n\
             u3,{}; ffff,PMC,T,,,,,,2020-05-01,,\n",
            doc_id(1),
            doc_id(3)
        ),
    )
    .unwrap();

    let (docs, _) = load_corpus(dir.path()).unwrap();
    let mut engine = super::common::engine();
    engine.index_corpus(docs);
    engine.attach_metadata(load_metadata(&csv_path).unwrap());

    let first = engine.metadata(doc_id(1).as_str()).unwrap();
    assert_eq!(first.published.as_deref(), Some("2020-02-14"));
    assert_eq!(first.publication.as_deref(), Some("Journal of Virology"));
    let third = engine.metadata(doc_id(3).as_str()).unwrap();
    assert_eq!(third.publication, None);
    assert!(engine.metadata(doc_id(2).as_str()).is_none());
}

#[test]
fn test_preview_of_ranked_article() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path());
    let (docs, _) = load_corpus(dir.path()).unwrap();
    let mut engine = super::common::engine();
    engine.index_corpus(docs);

    let response = engine.search("replication").unwrap();
    let top = engine.document(response.results[0].document_id.as_str()).unwrap();
    assert_eq!(top.preview(3), "Coronavirus replication takes");
    assert_eq!(
        top.preview(PREVIEW_WORDS).split_whitespace().count(),
        top.body_text.split_whitespace().count()
    );
}
