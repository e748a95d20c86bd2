// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean queries: lex, parse, evaluate.
//!
//! ```text
//! "AND cell virus NOT host AUTHOR Liu"
//!        │ lex
//!        ▼
//! [AND] cell virus [NOT] host [AUTHOR] Liu
//!        │ parse
//!        ▼
//! AuthorFilter(Not(And[cell, virus], host), Liu)   + warnings
//!        │ evaluate (word index, author index)
//!        ▼
//! matching ids + missing terms/author
//! ```

mod eval;
mod lexer;
mod parser;

pub use eval::{Evaluation, Evaluator};
pub use lexer::{lex, Keyword, Token};
pub use parser::{parse, ParsedQuery, QueryExpr, QueryWarning};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query is empty")]
    Empty,
}
