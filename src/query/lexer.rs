// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query lexer: whitespace-separated tokens, keywords recognized exactly.
//!
//! Keywords are case-sensitive and must be whole tokens. `and`, `Not` or
//! `ANDERSON` are ordinary words.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    Or,
    Not,
    Author,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Author => "AUTHOR",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "AND" => Some(Keyword::And),
            "OR" => Some(Keyword::Or),
            "NOT" => Some(Keyword::Not),
            "AUTHOR" => Some(Keyword::Author),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Keyword(Keyword),
    Word(&'a str),
}

impl<'a> Token<'a> {
    /// The token as it appeared in the query.
    pub fn text(&self) -> &'a str {
        match self {
            Token::Keyword(k) => k.as_str(),
            Token::Word(w) => w,
        }
    }
}

pub fn lex(input: &str) -> Vec<Token<'_>> {
    input
        .split_whitespace()
        .map(|t| Keyword::from_token(t).map_or(Token::Word(t), Token::Keyword))
        .collect()
}
