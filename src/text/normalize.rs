// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character-level cleanup shared by indexing, querying and scoring.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Strip ASCII punctuation and digits, fold diacritics, lowercase.
///
/// Punctuation is deleted rather than replaced with a space, so
/// `"covid-19"` becomes `"covid"` and `"host's"` becomes `"hosts"`.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks
/// 3. Drop ASCII punctuation and digits
/// 4. Lowercase
///
/// Without the feature, step 1-2 are skipped and accented letters survive.
#[cfg(feature = "unicode-normalization")]
pub fn clean(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !is_stripped(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn clean(value: &str) -> String {
    value
        .chars()
        .filter(|c| !is_stripped(*c))
        .collect::<String>()
        .to_lowercase()
}

#[inline]
fn is_stripped(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_ascii_digit()
}

/// Combining marks (Unicode category Mn) in the ranges that show up in
/// author names and Latin-script abstracts.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Whitespace tokenizer. Empty tokens never appear.
#[inline]
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}
