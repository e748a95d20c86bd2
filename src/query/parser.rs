// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parser: tokens to a typed AST.
//!
//! # Grammar
//!
//! ```text
//! query := (AND terms | OR terms | term) [NOT term] [AUTHOR surname...]
//! terms := term (' ' term)*
//! ```
//!
//! `AND`/`OR` only count in leading position. `AUTHOR` swallows the rest of
//! the query, so it has to come last.
//!
//! The parser never rejects a non-empty query. Anything that doesn't fit the
//! grammar is skipped and recorded as a `QueryWarning`, and evaluation goes
//! ahead with whatever parsed. Only a query with no tokens is an error.

use std::fmt;

use super::lexer::{lex, Keyword, Token};
use super::QueryError;

/// Typed query tree.
///
/// `Not` and `AuthorFilter` wrap the clause they restrict. The parser
/// always produces `AuthorFilter(Not(base))` nesting, outermost first, with
/// either wrapper optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    Term(String),
    And(Vec<String>),
    Or(Vec<String>),
    Not {
        base: Box<QueryExpr>,
        term: String,
    },
    AuthorFilter {
        base: Box<QueryExpr>,
        surname: String,
    },
}

impl QueryExpr {
    /// The terms that select documents (not the excluded one).
    pub fn positive_terms(&self) -> Vec<&str> {
        match self {
            QueryExpr::Term(t) => vec![t.as_str()],
            QueryExpr::And(terms) | QueryExpr::Or(terms) => {
                terms.iter().map(String::as_str).collect()
            }
            QueryExpr::Not { base, .. } | QueryExpr::AuthorFilter { base, .. } => {
                base.positive_terms()
            }
        }
    }

    pub fn exclusion(&self) -> Option<&str> {
        match self {
            QueryExpr::Not { term, .. } => Some(term),
            QueryExpr::AuthorFilter { base, .. } => base.exclusion(),
            _ => None,
        }
    }

    pub fn author(&self) -> Option<&str> {
        match self {
            QueryExpr::AuthorFilter { surname, .. } => Some(surname),
            QueryExpr::Not { base, .. } => base.author(),
            _ => None,
        }
    }
}

/// Renders back to query syntax.
impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpr::Term(t) => write!(f, "{}", t),
            QueryExpr::And(terms) => write!(f, "AND {}", terms.join(" ")),
            QueryExpr::Or(terms) => write!(f, "OR {}", terms.join(" ")),
            QueryExpr::Not { base, term } => write!(f, "{} NOT {}", base, term),
            QueryExpr::AuthorFilter { base, surname } => write!(f, "{} AUTHOR {}", base, surname),
        }
    }
}

/// Something in the query that didn't fit the grammar and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryWarning {
    /// `AND`/`OR` with no terms, or a query that opens with `NOT`/`AUTHOR`.
    MissingTerms(Option<Keyword>),
    /// Words the grammar has no slot for.
    IgnoredWords(Vec<String>),
    /// `AND`/`OR` after the first token.
    StrayKeyword(Keyword),
    /// `NOT` at the end of the query or right before another keyword.
    MissingNotTerm,
    /// `AUTHOR` with nothing after it.
    MissingAuthor,
    /// A second `NOT` clause. Only the first one applies.
    RepeatedNot,
}

impl fmt::Display for QueryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryWarning::MissingTerms(Some(k)) => write!(f, "{} has no search terms", k),
            QueryWarning::MissingTerms(None) => write!(f, "query has no search term"),
            QueryWarning::IgnoredWords(words) => write!(f, "ignored: {}", words.join(" ")),
            QueryWarning::StrayKeyword(k) => write!(f, "{} only works at the start", k),
            QueryWarning::MissingNotTerm => write!(f, "NOT needs a term"),
            QueryWarning::MissingAuthor => write!(f, "AUTHOR needs a surname"),
            QueryWarning::RepeatedNot => write!(f, "only the first NOT clause is used"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub expr: QueryExpr,
    pub warnings: Vec<QueryWarning>,
}

impl ParsedQuery {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub fn parse(input: &str) -> Result<ParsedQuery, QueryError> {
    let tokens = lex(input);
    if tokens.is_empty() {
        return Err(QueryError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        warnings: Vec::new(),
    };
    let base = parser.base_clause();
    let (exclusion, author) = parser.trailing_clauses();

    let mut expr = base;
    if let Some(term) = exclusion {
        expr = QueryExpr::Not {
            base: Box::new(expr),
            term,
        };
    }
    if let Some(surname) = author {
        expr = QueryExpr::AuthorFilter {
            base: Box::new(expr),
            surname,
        };
    }

    Ok(ParsedQuery {
        expr,
        warnings: parser.warnings,
    })
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    warnings: Vec<QueryWarning>,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    /// Consume words up to the next keyword.
    fn words(&mut self) -> Vec<String> {
        let mut words = Vec::new();
        while let Some(Token::Word(w)) = self.peek() {
            words.push(w.to_string());
            self.pos += 1;
        }
        words
    }

    fn skip_extra_words(&mut self) {
        let extra = self.words();
        if !extra.is_empty() {
            self.warnings.push(QueryWarning::IgnoredWords(extra));
        }
    }

    fn base_clause(&mut self) -> QueryExpr {
        match self.peek() {
            Some(Token::Keyword(op @ (Keyword::And | Keyword::Or))) => {
                self.pos += 1;
                let terms = self.words();
                if terms.is_empty() {
                    self.warnings.push(QueryWarning::MissingTerms(Some(op)));
                }
                if op == Keyword::And {
                    QueryExpr::And(terms)
                } else {
                    QueryExpr::Or(terms)
                }
            }
            Some(Token::Word(w)) => {
                self.pos += 1;
                self.skip_extra_words();
                QueryExpr::Term(w.to_string())
            }
            // Opens with NOT/AUTHOR: nothing to select from.
            _ => {
                self.warnings.push(QueryWarning::MissingTerms(None));
                QueryExpr::Or(Vec::new())
            }
        }
    }

    fn trailing_clauses(&mut self) -> (Option<String>, Option<String>) {
        let mut exclusion: Option<String> = None;
        let mut author: Option<String> = None;

        while let Some(token) = self.peek() {
            self.pos += 1;
            match token {
                Token::Keyword(Keyword::Not) => {
                    let term = match self.peek() {
                        Some(Token::Word(w)) => {
                            self.pos += 1;
                            Some(w.to_string())
                        }
                        _ => {
                            self.warnings.push(QueryWarning::MissingNotTerm);
                            None
                        }
                    };
                    if exclusion.is_some() && term.is_some() {
                        self.warnings.push(QueryWarning::RepeatedNot);
                    } else if term.is_some() {
                        exclusion = term;
                    }
                    self.skip_extra_words();
                }
                Token::Keyword(Keyword::Author) => {
                    let rest: Vec<&str> = self.tokens[self.pos..].iter().map(Token::text).collect();
                    self.pos = self.tokens.len();
                    if rest.is_empty() {
                        self.warnings.push(QueryWarning::MissingAuthor);
                    } else {
                        author = Some(rest.join(" "));
                    }
                }
                Token::Keyword(k) => {
                    self.warnings.push(QueryWarning::StrayKeyword(k));
                    self.skip_extra_words();
                }
                Token::Word(w) => {
                    self.warnings.push(QueryWarning::IgnoredWords(vec![w.to_string()]));
                }
            }
        }

        (exclusion, author)
    }
}
