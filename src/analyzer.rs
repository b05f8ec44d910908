// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text analyzer: turns a raw field string into a token→weight map.
//!
//! Normalization: lowercase, collapse runs of non-alphanumeric characters
//! into word boundaries, then for each word emit the full word at weight
//! `1.0` plus — when the word is long enough to be worth indexing partially,
//! or the caller explicitly asked for it — every proper prefix and every
//! camelCase/digit-boundary segment, each weighted by how much of the word
//! it covers (`k / L`). Tokens shorter than two characters never survive;
//! weights for a token produced twice (e.g. a prefix that coincides with a
//! segment) combine by `max`.
//!
//! This module performs no I/O and never errors: an absent or empty field is
//! simply an empty token map.

use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// A token→weight map produced by [`tokenize`]. Weight is always in `(0, 1]`.
pub type TokenWeights = HashMap<String, f64>;

/// Minimum word length to partially index (prefixes/segments) without an
/// explicit `split` request.
const AUTO_SPLIT_LEN: usize = 4;

/// Tokenize `text` into a token→weight map.
///
/// `split`: when `true`, every word (not only words of length >= 4) is also
/// expanded into prefixes and camelCase/digit segments. This is used by the
/// query side (via [`split_for_indexing`] + per-word lookups) so that short
/// query words can still match partial tokens in the index.
pub fn tokenize(text: Option<&str>, split: bool) -> TokenWeights {
    let mut weights = TokenWeights::new();
    let Some(text) = text else {
        return weights;
    };
    if text.is_empty() {
        return weights;
    }

    for raw_word in raw_words(text) {
        add_word(&mut weights, &raw_word, split);
    }
    weights
}

/// The ordered list of words a query string decomposes into, used as the
/// per-word terms for [`crate::token_index::TokenIndex::search_words`].
pub fn split_for_indexing(text: &str) -> Vec<String> {
    raw_words(text)
        .into_iter()
        .map(|w| normalize_word(&w))
        .collect()
}

fn add_word(weights: &mut TokenWeights, raw_word: &str, force_split: bool) {
    let lower = normalize_word(raw_word);
    let l = lower.chars().count();
    if l < 2 {
        return;
    }
    insert_max(weights, lower.clone(), 1.0);

    if l < AUTO_SPLIT_LEN && !force_split {
        return;
    }

    for k in 2..l {
        let prefix: String = lower.chars().take(k).collect();
        insert_max(weights, prefix, k as f64 / l as f64);
    }

    for segment in camel_and_digit_segments(raw_word) {
        let seg_lower = normalize_word(&segment);
        let k = seg_lower.chars().count();
        if k >= 2 {
            insert_max(weights, seg_lower, k as f64 / l as f64);
        }
    }
}

fn insert_max(weights: &mut TokenWeights, token: String, weight: f64) {
    weights
        .entry(token)
        .and_modify(|existing| {
            if weight > *existing {
                *existing = weight;
            }
        })
        .or_insert(weight);
}

/// Lowercase and strip diacritics (NFD decompose, drop combining marks).
fn normalize_word(word: &str) -> String {
    word.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{1AB0}'..='\u{1AFF}' | '\u{1DC0}'..='\u{1DFF}')
}

/// Split `text` into maximal runs of alphanumeric characters, i.e. replace
/// each run of non-alphanumeric characters with a single separator. Preserves
/// original casing so camelCase boundaries can still be detected downstream.
fn raw_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() {
            current.push(c);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
}

fn classify(c: char) -> CharClass {
    if c.is_ascii_digit() || (c.is_numeric() && !c.is_alphabetic()) {
        CharClass::Digit
    } else if c.is_uppercase() {
        CharClass::Upper
    } else {
        CharClass::Lower
    }
}

/// Split a single word at camelCase and digit boundaries, e.g.
/// `"getHTTPResponse2"` → `["get", "HTTP", "Response", "2"]`.
fn camel_and_digit_segments(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return Vec::new();
    }
    let classes: Vec<CharClass> = chars.iter().map(|c| classify(*c)).collect();

    let mut boundaries = Vec::new();
    for i in 1..chars.len() {
        let prev = classes[i - 1];
        let cur = classes[i];
        let is_boundary = match (prev, cur) {
            (CharClass::Lower, CharClass::Upper) => true,
            (CharClass::Digit, CharClass::Upper | CharClass::Lower) => true,
            (CharClass::Upper | CharClass::Lower, CharClass::Digit) => true,
            (CharClass::Upper, CharClass::Upper) => {
                i + 1 < chars.len() && classes[i + 1] == CharClass::Lower
            }
            _ => false,
        };
        if is_boundary {
            boundaries.push(i);
        }
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for b in boundaries {
        segments.push(chars[start..b].iter().collect());
        start = b;
    }
    segments.push(chars[start..].iter().collect());
    // The whole-word segment (== the word itself) is already indexed at
    // weight 1.0 by the caller; only multi-segment splits are useful here.
    if segments.len() <= 1 {
        Vec::new()
    } else {
        segments
    }
}
