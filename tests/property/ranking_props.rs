//! Ranking bounds and determinism.

use super::common::{doc_id, make_doc};
use proptest::prelude::*;
use quarry::ranking::{term_frequency, Ranker};
use quarry::{DocId, Document, Normalizer, StopWords, TermMatching, MAX_RESULTS};
use std::collections::HashMap;

const WORDS: &[&str] = &["cell", "virus", "host", "the", "of", "lung"];

fn body_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..30).prop_map(|w| w.join(" "))
}

fn corpus(bodies: &[String]) -> HashMap<DocId, Document> {
    bodies
        .iter()
        .enumerate()
        .map(|(n, body)| (doc_id(n), make_doc(doc_id(n), &["Liu"], body)))
        .collect()
}

proptest! {
    /// At most `MAX_RESULTS`, at most one per candidate, sorted by score.
    #[test]
    fn prop_top_k_bound(bodies in prop::collection::vec(body_strategy(), 0..40)) {
        let stop_words = StopWords::from_lines("the\nof\n");
        let normalizer = Normalizer::new();
        let ranker = Ranker::new(&stop_words, &normalizer, TermMatching::Raw);
        let docs = corpus(&bodies);
        let candidates: Vec<DocId> = (0..bodies.len()).map(doc_id).collect();

        let results = ranker.rank(&candidates, &["cell", "virus"], &docs, MAX_RESULTS);
        prop_assert!(results.len() <= MAX_RESULTS.min(candidates.len()));
        prop_assert_eq!(results.len(), MAX_RESULTS.min(candidates.len()));
        for pair in results.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].document_id < pair[1].document_id)
            );
        }
    }

    /// Candidate order doesn't change the ranking.
    #[test]
    fn prop_ranking_ignores_candidate_order(bodies in prop::collection::vec(body_strategy(), 1..25)) {
        let stop_words = StopWords::empty();
        let normalizer = Normalizer::new();
        let ranker = Ranker::new(&stop_words, &normalizer, TermMatching::Raw);
        let docs = corpus(&bodies);
        let forward: Vec<DocId> = (0..bodies.len()).map(doc_id).collect();
        let backward: Vec<DocId> = forward.iter().rev().cloned().collect();

        prop_assert_eq!(
            ranker.rank(&forward, &["host"], &docs, MAX_RESULTS),
            ranker.rank(&backward, &["host"], &docs, MAX_RESULTS)
        );
    }

    /// Score is exactly the summed frequency over de-stop-worded tokens.
    #[test]
    fn prop_score_is_term_frequency(body in body_strategy()) {
        let stop_words = StopWords::from_lines("the\nof\n");
        let normalizer = Normalizer::new();
        let ranker = Ranker::new(&stop_words, &normalizer, TermMatching::Raw);

        let tokens: Vec<&str> = body.split_whitespace().filter(|t| *t != "the" && *t != "of").collect();
        let expected = term_frequency(&tokens, "cell") + term_frequency(&tokens, "lung");
        let score = ranker.score(&body, &["cell", "lung"]);
        prop_assert!((score - expected).abs() < 1e-12);
        prop_assert!((0.0..=2.0).contains(&score));
    }
}
