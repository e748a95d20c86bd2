//! Save/restore through both on-disk formats.

use super::common::{doc_id, engine, make_doc, write_sample_corpus};
use quarry::build::load_corpus;
use quarry::verify::{check_author_index, check_tree};
use quarry::{Document, IndexEntry, PersistFormat, SearchEngine};
use std::fs;

fn sample() -> (SearchEngine, Vec<Document>) {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path());
    let (docs, _) = load_corpus(dir.path()).unwrap();
    let mut engine = engine();
    engine.index_corpus(docs.clone());
    (engine, docs)
}

fn sorted_authors(engine: &SearchEngine) -> Vec<IndexEntry> {
    let mut entries = engine.author_index().entries();
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    entries
}

#[test]
fn test_line_format_round_trip() {
    let (original, _) = sample();
    let dir = tempfile::tempdir().unwrap();
    original.save(dir.path(), PersistFormat::Lines).unwrap();

    let mut restored = engine();
    let report = restored.restore(dir.path(), PersistFormat::Lines).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.words, Some(original.word_index().unique_key_count()));

    assert_eq!(
        restored.word_index().in_order_entries(),
        original.word_index().in_order_entries()
    );
    assert_eq!(sorted_authors(&restored), sorted_authors(&original));
    check_tree(restored.word_index()).unwrap();
    check_author_index(restored.author_index()).unwrap();
}

#[test]
fn test_line_files_have_expected_layout() {
    let (original, _) = sample();
    let dir = tempfile::tempdir().unwrap();
    original.save(dir.path(), PersistFormat::Lines).unwrap();

    let text = fs::read_to_string(dir.path().join("word_index.txt")).unwrap();
    let keys: Vec<&str> = text.lines().filter(|l| l.len() != 40).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "keys must be written in ascending order");
    assert!(keys.contains(&"cell"));
}

#[test]
fn test_json_snapshot_round_trip() {
    let (original, _) = sample();
    let dir = tempfile::tempdir().unwrap();
    original.save(dir.path(), PersistFormat::Json).unwrap();
    assert!(dir.path().join("index.json").exists());

    let mut restored = engine();
    let report = restored.restore(dir.path(), PersistFormat::Json).unwrap();
    assert!(report.is_complete());
    assert_eq!(
        restored.word_index().in_order_entries(),
        original.word_index().in_order_entries()
    );
    assert_eq!(sorted_authors(&restored), sorted_authors(&original));
}

#[test]
fn test_restored_engine_answers_like_the_original() {
    let (original, docs) = sample();
    let dir = tempfile::tempdir().unwrap();
    original.save(dir.path(), PersistFormat::Lines).unwrap();

    let mut restored = engine();
    restored.attach_documents(docs);
    restored.restore(dir.path(), PersistFormat::Lines).unwrap();

    for query in ["cells", "OR barrier influenza", "cells NOT coronavirus AUTHOR Liu"] {
        assert_eq!(
            restored.search(query).unwrap().results,
            original.search(query).unwrap().results,
            "query {:?}",
            query
        );
    }
}

#[test]
fn test_restore_without_documents_scores_zero() {
    let (original, _) = sample();
    let dir = tempfile::tempdir().unwrap();
    original.save(dir.path(), PersistFormat::Lines).unwrap();

    let mut restored = engine();
    restored.restore(dir.path(), PersistFormat::Lines).unwrap();
    let response = restored.search("cells").unwrap();
    assert_eq!(response.results.len(), 3);
    assert!(response.results.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_missing_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut restored = engine();

    let report = restored.restore(dir.path(), PersistFormat::Lines).unwrap();
    assert_eq!(report.words, None);
    assert_eq!(report.authors, None);
    assert_eq!(report.missing.len(), 2);

    let report = restored.restore(dir.path(), PersistFormat::Json).unwrap();
    assert_eq!(report.missing, vec![dir.path().join("index.json")]);
}

#[test]
fn test_save_creates_output_directory() {
    let (original, _) = sample();
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("out").join("indexes");
    original.save(&nested, PersistFormat::Lines).unwrap();
    assert!(nested.join("author_index.txt").exists());
}

#[test]
fn test_unreadable_author_file_leaves_engine_untouched() {
    let (mut current, _) = sample();
    let dir = tempfile::tempdir().unwrap();
    let config = current.config().clone();

    let mut other = engine();
    other.index_corpus(vec![make_doc(doc_id(99), &["Nobody"], "prion")]);
    other.save(dir.path(), PersistFormat::Lines).unwrap();
    fs::write(dir.path().join(&config.author_index_file), b"Smith\n\xff\xfe\n").unwrap();

    let before = current.word_index().in_order_entries();
    assert!(current.restore(dir.path(), PersistFormat::Lines).is_err());
    assert_eq!(current.word_index().in_order_entries(), before);
    assert!(!current.word_index().contains("prion"));
    assert!(current.author_index().lookup("Liu").is_some());
}
