//! End-to-end queries over the sample corpus.

use super::common::{doc_id, engine, write_sample_corpus};
use quarry::build::load_corpus;
use quarry::{EngineConfig, QueryWarning, SearchEngine, StopWords, TermMatching};

fn sample_engine_with(config: EngineConfig) -> SearchEngine {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path());
    let (docs, _) = load_corpus(dir.path()).unwrap();
    let mut engine = SearchEngine::new(config, StopWords::builtin());
    engine.index_corpus(docs);
    engine
}

fn sample_engine() -> SearchEngine {
    sample_engine_with(EngineConfig::default())
}

fn ids(engine: &SearchEngine, query: &str) -> Vec<String> {
    let mut ids: Vec<String> = engine
        .search(query)
        .unwrap()
        .results
        .iter()
        .map(|r| r.document_id.to_string())
        .collect();
    ids.sort();
    ids
}

fn expected(ns: &[usize]) -> Vec<String> {
    ns.iter().map(|&n| doc_id(n).to_string()).collect()
}

#[test]
fn test_and_query() {
    assert_eq!(ids(&sample_engine(), "AND membrane replication"), expected(&[3]));
}

#[test]
fn test_or_query() {
    assert_eq!(ids(&sample_engine(), "OR barrier influenza"), expected(&[2, 4]));
}

#[test]
fn test_not_query() {
    assert_eq!(ids(&sample_engine(), "cells NOT coronavirus"), expected(&[1, 2]));
}

#[test]
fn test_author_query() {
    assert_eq!(ids(&sample_engine(), "cells AUTHOR Liu"), expected(&[1, 3]));
}

#[test]
fn test_unknown_author_keeps_results() {
    let engine = sample_engine();
    let response = engine.search("cells AUTHOR Nobody").unwrap();
    assert_eq!(response.results.len(), 3);
    assert_eq!(response.missing_author.as_deref(), Some("Nobody"));
}

#[test]
fn test_query_is_normalized_before_lookup() {
    let engine = sample_engine();
    assert_eq!(ids(&engine, "Replications"), ids(&engine, "replication"));
    assert_eq!(ids(&engine, "Replications"), expected(&[3]));
}

#[test]
fn test_raw_matching_is_case_sensitive() {
    let engine = sample_engine();
    let response = engine.search("OR barrier influenza").unwrap();
    let barrier = &response.results[0];
    let influenza = &response.results[1];

    assert_eq!(barrier.document_id, doc_id(2));
    assert!(barrier.score > 0.0);
    // Body says "Influenza", the raw term is "influenza".
    assert_eq!(influenza.document_id, doc_id(4));
    assert_eq!(influenza.score, 0.0);
}

#[test]
fn test_normalized_matching_scores_stemmed_forms() {
    let config = EngineConfig {
        term_matching: TermMatching::Normalized,
        ..EngineConfig::default()
    };
    let engine = sample_engine_with(config);
    let response = engine.search("OR barrier influenza").unwrap();
    assert!(response.results.iter().all(|r| r.score > 0.0));
}

#[test]
fn test_top_k_limits_results() {
    let config = EngineConfig {
        top_k: 1,
        ..EngineConfig::default()
    };
    let engine = sample_engine_with(config);
    let response = engine.search("cells").unwrap();
    assert_eq!(response.candidates, 3);
    assert_eq!(response.results.len(), 1);
}

#[test]
fn test_malformed_query_warns_but_runs() {
    let engine = sample_engine();
    let response = engine.search("cells AND barrier").unwrap();
    assert_eq!(response.results.len(), 3);
    assert!(response
        .warnings
        .iter()
        .any(|w| matches!(w, QueryWarning::StrayKeyword(_))));
}

#[test]
fn test_empty_query_is_an_error() {
    assert!(matches!(
        engine().search(""),
        Err(quarry::Error::Query(quarry::QueryError::Empty))
    ));
}

#[test]
fn test_search_on_empty_engine_finds_nothing() {
    let response = engine().search("AND cell virus").unwrap();
    assert!(response.results.is_empty());
    assert_eq!(response.missing_terms, vec!["cell".to_string(), "virus".to_string()]);
}
