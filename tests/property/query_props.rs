//! Query evaluation against a `BTreeSet` oracle.

use super::common::{doc_id, example_indexes};
use proptest::prelude::*;
use quarry::query::{parse, Evaluator};
use quarry::{AuthorIndex, DocId, IndexTree, Normalizer};
use std::collections::{BTreeMap, BTreeSet};

/// Words the English stemmer leaves unchanged, plus one never indexed.
const VOCAB: &[&str] = &["cell", "virus", "host", "lung", "prion", "fever", "zebra"];
const INDEXED: usize = 6;
const AUTHORS: &[&str] = &["Liu", "Smith", "Garcia", "Nobody"];
const KNOWN_AUTHORS: usize = 3;
const DOCS: usize = 16;

#[derive(Debug, Clone)]
struct Corpus {
    /// Per document: bitmask over the indexed vocabulary and over authors.
    docs: Vec<(u8, u8)>,
}

#[derive(Debug, Clone)]
enum Op {
    And,
    Or,
    Single,
}

#[derive(Debug, Clone)]
struct Query {
    op: Op,
    terms: Vec<usize>,
    not: Option<usize>,
    author: Option<usize>,
}

fn corpus_strategy() -> impl Strategy<Value = Corpus> {
    prop::collection::vec((any::<u8>(), any::<u8>()), DOCS).prop_map(|docs| Corpus { docs })
}

fn query_strategy() -> impl Strategy<Value = Query> {
    (
        prop_oneof![Just(Op::And), Just(Op::Or), Just(Op::Single)],
        prop::collection::vec(0..VOCAB.len(), 1..4),
        prop::option::of(0..VOCAB.len()),
        prop::option::of(0..AUTHORS.len()),
    )
        .prop_map(|(op, mut terms, not, author)| {
            if matches!(op, Op::Single) {
                terms.truncate(1);
            }
            Query { op, terms, not, author }
        })
}

impl Corpus {
    fn build(&self) -> (IndexTree, AuthorIndex, BTreeMap<&'static str, BTreeSet<DocId>>) {
        let mut words = IndexTree::new();
        let mut authors = AuthorIndex::new(13);
        let mut oracle: BTreeMap<&'static str, BTreeSet<DocId>> = BTreeMap::new();

        for (n, &(word_mask, author_mask)) in self.docs.iter().enumerate() {
            let id = doc_id(n);
            for (bit, word) in VOCAB.iter().take(INDEXED).enumerate() {
                if word_mask & (1 << bit) != 0 {
                    words.insert(word, id.clone());
                    oracle.entry(*word).or_default().insert(id.clone());
                }
            }
            for (bit, author) in AUTHORS.iter().take(KNOWN_AUTHORS).enumerate() {
                if author_mask & (1 << bit) != 0 {
                    authors.insert(author, id.clone());
                    oracle.entry(*author).or_default().insert(id.clone());
                }
            }
        }
        (words, authors, oracle)
    }
}

impl Query {
    fn render(&self) -> String {
        let terms: Vec<&str> = self.terms.iter().map(|&t| VOCAB[t]).collect();
        let mut query = match self.op {
            Op::And => format!("AND {}", terms.join(" ")),
            Op::Or => format!("OR {}", terms.join(" ")),
            Op::Single => terms[0].to_string(),
        };
        if let Some(t) = self.not {
            query.push_str(&format!(" NOT {}", VOCAB[t]));
        }
        if let Some(a) = self.author {
            query.push_str(&format!(" AUTHOR {}", AUTHORS[a]));
        }
        query
    }

    fn expected(&self, oracle: &BTreeMap<&'static str, BTreeSet<DocId>>) -> BTreeSet<DocId> {
        let set = |key: &str| oracle.get(key).cloned().unwrap_or_default();
        let mut sets = self.terms.iter().map(|&t| set(VOCAB[t]));

        let mut result = match self.op {
            Op::And => {
                let first = sets.next().unwrap_or_default();
                sets.fold(first, |acc, s| acc.intersection(&s).cloned().collect())
            }
            Op::Or => sets.fold(BTreeSet::new(), |acc, s| acc.union(&s).cloned().collect()),
            Op::Single => set(VOCAB[self.terms[0]]),
        };
        if let Some(t) = self.not {
            let excluded = set(VOCAB[t]);
            result = result.difference(&excluded).cloned().collect();
        }
        if let Some(a) = self.author {
            let by_author = set(AUTHORS[a]);
            if !by_author.is_empty() {
                result = result.intersection(&by_author).cloned().collect();
            }
        }
        result
    }
}

proptest! {
    #[test]
    fn prop_evaluator_matches_oracle(corpus in corpus_strategy(), query in query_strategy()) {
        let (words, authors, oracle) = corpus.build();
        let normalizer = Normalizer::new();
        let text = query.render();

        let parsed = parse(&text).unwrap();
        prop_assert!(parsed.is_clean(), "{}: {:?}", text, parsed.warnings);
        let evaluation = Evaluator::new(&words, &authors, &normalizer).evaluate(&parsed.expr);

        let got: BTreeSet<DocId> = evaluation.matches.iter().cloned().collect();
        prop_assert_eq!(got.len(), evaluation.matches.len(), "duplicate ids for {}", text);
        prop_assert_eq!(got, query.expected(&oracle), "query {}", text);
    }

    /// The parser never panics and only rejects blank input.
    #[test]
    fn prop_parse_is_total(input in "[A-Za-z ]{0,40}") {
        match parse(&input) {
            Ok(_) => prop_assert!(!input.trim().is_empty()),
            Err(_) => prop_assert!(input.trim().is_empty()),
        }
    }
}

#[test]
fn test_documented_example() {
    let (words, authors) = example_indexes();
    let normalizer = Normalizer::new();
    let run = |q: &str| -> Vec<DocId> {
        let parsed = parse(q).unwrap();
        Evaluator::new(&words, &authors, &normalizer)
            .evaluate(&parsed.expr)
            .matches
    };

    assert_eq!(run("AND cell virus"), vec![doc_id(2), doc_id(3)]);
    assert_eq!(run("OR cell virus"), vec![doc_id(1), doc_id(2), doc_id(3)]);
    assert_eq!(run("cell NOT virus"), vec![doc_id(1)]);
    assert_eq!(run("cell AUTHOR Liu"), vec![doc_id(1)]);
}
