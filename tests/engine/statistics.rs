//! The statistics report.

use super::common::{doc_id, engine, make_doc, write_sample_corpus};
use quarry::build::load_corpus;
use quarry::{EngineConfig, SearchEngine, StopWords, WordCount};

#[test]
fn test_sample_corpus_statistics() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path());
    let (docs, _) = load_corpus(dir.path()).unwrap();
    let mut engine = engine();
    engine.index_corpus(docs);

    let stats = engine.statistics();
    assert_eq!(stats.articles, 4);
    // Liu, Garcia, Okafor and the N/A placeholder
    assert_eq!(stats.unique_authors, 4);
    assert_eq!(stats.avg_words_per_article, stats.words_indexed / 4);
    assert_eq!(stats.top_words[0], WordCount { word: "cell".into(), count: 3 });
}

#[test]
fn test_counters_and_averages() {
    let mut engine = SearchEngine::new(EngineConfig::default(), StopWords::from_lines("the\nof\n"));
    engine.index_document(make_doc(doc_id(1), &["Liu"], "the cell of the host"));
    engine.index_document(make_doc(doc_id(2), &["Liu"], "virus virus"));

    let stats = engine.statistics();
    assert_eq!(stats.articles, 2);
    // {cell, host} + {virus}
    assert_eq!(stats.words_indexed, 3);
    assert_eq!(stats.unique_words, 3);
    assert_eq!(stats.unique_authors, 1);
    assert_eq!(stats.avg_words_per_article, 1);
    // 3 stop words over 2 articles
    assert_eq!(stats.avg_stop_words_per_article, 1);
}

#[test]
fn test_top_words_respects_config() {
    let config = EngineConfig {
        top_words: 2,
        ..EngineConfig::default()
    };
    let mut engine = SearchEngine::new(config, StopWords::empty());
    engine.index_document(make_doc(doc_id(1), &["A"], "alpha beta gamma"));
    engine.index_document(make_doc(doc_id(2), &["B"], "beta gamma"));
    engine.index_document(make_doc(doc_id(3), &["C"], "gamma"));

    let top: Vec<(String, usize)> = engine
        .statistics()
        .top_words
        .into_iter()
        .map(|w| (w.word, w.count))
        .collect();
    assert_eq!(top, vec![("gamma".to_string(), 3), ("beta".to_string(), 2)]);
}
