// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the query lexer, parser and evaluator.
//!
//! Queries come straight from users. Any string must parse (or be rejected
//! as empty) and evaluate without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry::query::{parse, Evaluator};
use quarry::testing::example_indexes;
use quarry::{Normalizer, QueryError};

fuzz_target!(|data: &str| {
    let parsed = match parse(data) {
        Ok(parsed) => parsed,
        Err(QueryError::Empty) => {
            assert!(data.split_whitespace().next().is_none());
            return;
        }
    };

    // Rendering and reparsing keeps the expression.
    let rendered = parsed.expr.to_string();
    if parsed.is_clean() && !rendered.is_empty() {
        let reparsed = parse(&rendered).expect("rendered query is non-empty");
        assert_eq!(reparsed.expr, parsed.expr, "render of {:?} drifted", data);
    }

    let (words, authors) = example_indexes();
    let normalizer = Normalizer::new();
    let evaluation = Evaluator::new(&words, &authors, &normalizer).evaluate(&parsed.expr);

    // Matches are sorted and unique.
    assert!(evaluation.matches.windows(2).all(|w| w[0] < w[1]));
});
