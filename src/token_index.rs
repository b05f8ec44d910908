// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One inverted index: token → `{doc-id: weight}`, plus a document-length
//! proxy used to normalize scores.
//!
//! # INVARIANTS
//!
//! 1. **NO_EMPTY_POSTINGS**: a token's posting list is removed entirely once
//!    its last document is removed.
//! 2. **NO_OP_READD**: re-`add`ing the same `(doc_id, text)` pair is a no-op,
//!    detected via a stored text hash.
//! 3. **ATOMIC_UPDATE**: readers never observe a document mid-update — `add`
//!    and `remove` hold the write lock for their full duration.
//!
//! Concurrency: one writer at a time, any number of concurrent readers,
//! enforced with a [`parking_lot::RwLock`] rather than plain interior
//! mutability, matching the "single writer per index" model the search core
//! is specified against.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;

use crate::analyzer::{split_for_indexing, tokenize, TokenWeights};
use crate::score::{DocId, ScoreMap};

#[derive(Default)]
struct State {
    /// token -> (doc_id -> weight)
    postings: HashMap<String, HashMap<DocId, f64>>,
    /// doc_id -> distinct token count (T), used for the size proxy.
    doc_sizes: HashMap<DocId, usize>,
    /// doc_id -> hash of (text, token count), for no-op re-add detection.
    text_hashes: HashMap<DocId, u64>,
}

/// One field's inverted index.
pub struct TokenIndex {
    state: RwLock<State>,
}

impl Default for TokenIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenIndex {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Tokenize `text` and index it under `doc_id`. An empty/missing `text`
    /// removes any prior entry. Re-adding identical `(doc_id, text)` is a
    /// no-op (detected via a stored text hash), otherwise prior postings for
    /// `doc_id` are purged before the new ones are inserted.
    pub fn add(&self, doc_id: &str, text: Option<&str>) {
        let weights = tokenize(text, false);
        let mut state = self.state.write();

        if weights.is_empty() {
            remove_locked(&mut state, doc_id);
            return;
        }

        let hash = text_hash(text.unwrap_or(""), weights.len());
        if state.text_hashes.get(doc_id) == Some(&hash) {
            return;
        }

        remove_locked(&mut state, doc_id);
        for (token, weight) in &weights {
            let posting = state.postings.entry(token.clone()).or_default();
            posting
                .entry(doc_id.to_string())
                .and_modify(|existing| {
                    if *weight > *existing {
                        *existing = *weight;
                    }
                })
                .or_insert(*weight);
        }
        state.doc_sizes.insert(doc_id.to_string(), weights.len());
        state.text_hashes.insert(doc_id.to_string(), hash);
    }

    /// Purge `doc_id` from every posting list, deleting any list that
    /// becomes empty as a result.
    pub fn remove(&self, doc_id: &str) {
        let mut state = self.state.write();
        remove_locked(&mut state, doc_id);
    }

    /// Resolve `text` (which may itself contain several words) against this
    /// field's vocabulary: each word is tokenized with `split = true` and
    /// restricted to tokens this index actually has a posting list for. If
    /// any word has no present tokens at all, the whole call returns empty
    /// — the field cannot match this query. Surviving tokens are filtered
    /// to those within `0.7` of the best per-word query-side weight, then
    /// merged by max across words.
    pub fn lookup_tokens(&self, text: &str) -> TokenWeights {
        let words = split_for_indexing(text);
        if words.is_empty() {
            return TokenWeights::new();
        }
        let state = self.state.read();
        let mut merged = TokenWeights::new();
        for word in &words {
            let candidates = tokenize(Some(word), true);
            let present: TokenWeights = candidates
                .into_iter()
                .filter(|(token, _)| state.postings.contains_key(token))
                .collect();
            if present.is_empty() {
                return TokenWeights::new();
            }
            let best = present.values().copied().fold(0.0_f64, f64::max);
            let threshold = 0.7 * best;
            for (token, weight) in present {
                if weight >= threshold {
                    merged
                        .entry(token)
                        .and_modify(|existing| {
                            if weight > *existing {
                                *existing = weight;
                            }
                        })
                        .or_insert(weight);
                }
            }
        }
        merged
    }

    /// A single-text search: `text`'s token match (see [`Self::lookup_tokens`])
    /// scored directly with weight `1.0`, no cross-word intersection.
    pub fn search(&self, text: &str) -> ScoreMap {
        let token_match = self.lookup_tokens(text);
        self.score_docs(&token_match, 1.0, 1, None)
    }

    /// Score each word independently (so every word is free to match any
    /// token it covers) and intersect via [`ScoreMap::multiply`] — a
    /// document must be relevant to every word to survive.
    pub fn search_words(
        &self,
        words: &[String],
        weight: f64,
        restrict_to: Option<&HashSet<DocId>>,
    ) -> ScoreMap {
        if let Some(ids) = restrict_to {
            if ids.is_empty() {
                return ScoreMap::empty();
            }
        }
        if words.is_empty() {
            return ScoreMap::empty();
        }
        let word_count = words.len();
        let per_word: Vec<ScoreMap> = words
            .iter()
            .map(|word| {
                let token_match = self.lookup_tokens(word);
                self.score_docs(&token_match, weight, word_count, restrict_to)
            })
            .collect();
        ScoreMap::multiply(per_word.iter())
    }

    fn score_docs(
        &self,
        token_match: &TokenWeights,
        weight: f64,
        word_count: usize,
        restrict_to: Option<&HashSet<DocId>>,
    ) -> ScoreMap {
        let state = self.state.read();
        let mut raw: HashMap<DocId, f64> = HashMap::new();
        for (token, query_weight) in token_match {
            let Some(posting) = state.postings.get(token) else {
                continue;
            };
            for (doc, doc_weight) in posting {
                if let Some(ids) = restrict_to {
                    if !ids.contains(doc) {
                        continue;
                    }
                }
                let score = query_weight * doc_weight;
                raw.entry(doc.clone())
                    .and_modify(|existing| {
                        if score > *existing {
                            *existing = score;
                        }
                    })
                    .or_insert(score);
            }
        }

        let exponent = 1.0 / word_count.max(1) as f64;
        let values = raw
            .into_iter()
            .map(|(doc, score)| {
                let distinct_tokens = state.doc_sizes.get(&doc).copied().unwrap_or(0);
                let size_proxy = document_size_proxy(distinct_tokens);
                let adjusted = size_proxy.powf(exponent);
                (doc, weight * score / adjusted)
            })
            .collect();
        ScoreMap::new(values)
    }

    pub fn token_count(&self) -> usize {
        self.state.read().postings.len()
    }

    pub fn document_count(&self) -> usize {
        self.state.read().doc_sizes.len()
    }
}

fn remove_locked(state: &mut State, doc_id: &str) {
    state.postings.retain(|_, docs| {
        docs.remove(doc_id);
        !docs.is_empty()
    });
    state.doc_sizes.remove(doc_id);
    state.text_hashes.remove(doc_id);
}

/// Document size proxy: `1 + log(1 + T) / 100`, `T` = distinct token count.
fn document_size_proxy(distinct_tokens: usize) -> f64 {
    1.0 + ((1 + distinct_tokens) as f64).ln() / 100.0
}

fn text_hash(text: &str, token_count: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    token_count.hash(&mut hasher);
    hasher.finish()
}
