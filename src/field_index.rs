// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A named bundle of per-field [`TokenIndex`]es, combined via best-field-wins
//! scoring.
//!
//! Each field (`name`, `description`, `readme`, `api_symbols`, ...) carries
//! its own token index and a field weight in `(0, 1]`. A query's combined
//! score is `Score.max` across fields of that field's weighted
//! `search_words` — a document scores as well as its single best-matching
//! field, never double-counted across fields.

use std::collections::HashMap;

use crate::score::{DocId, ScoreMap};
use crate::token_index::TokenIndex;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

struct Field {
    weight: f64,
    index: TokenIndex,
}

/// A named collection of token indexes, one per field, combined by
/// best-field-wins scoring.
pub struct FieldCollectionIndex {
    fields: Vec<(String, Field)>,
}

impl FieldCollectionIndex {
    /// Build a collection from `(field name, field weight)` pairs. Field
    /// names must be unique; weights need not sum to anything in particular.
    pub fn new(fields: impl IntoIterator<Item = (String, f64)>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, weight)| {
                (
                    name,
                    Field {
                        weight,
                        index: TokenIndex::new(),
                    },
                )
            })
            .collect();
        Self { fields }
    }

    /// Index `doc_id`'s text under each named field present in `texts`.
    /// Fields of this collection absent from `texts` are treated as
    /// removed for `doc_id` (an absent field is an empty field).
    pub fn add(&self, doc_id: &str, texts: &HashMap<String, String>) {
        for (name, field) in &self.fields {
            field.index.add(doc_id, texts.get(name).map(String::as_str));
        }
    }

    /// Build the whole collection from scratch given `(doc_id, field
    /// texts)` pairs, replacing whatever each field index currently holds.
    /// Uses a parallel per-document fan-out when the `parallel` feature is
    /// enabled, since the indexes serialize writers internally anyway.
    pub fn rebuild<'a, I>(&self, documents: I)
    where
        I: IntoIterator<Item = (&'a str, &'a HashMap<String, String>)>,
        I::IntoIter: Send,
    {
        #[cfg(feature = "parallel")]
        {
            let docs: Vec<(&str, &HashMap<String, String>)> = documents.into_iter().collect();
            docs.into_par_iter().for_each(|(doc_id, texts)| self.add(doc_id, texts));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (doc_id, texts) in documents {
                self.add(doc_id, texts);
            }
        }
    }

    pub fn remove(&self, doc_id: &str) {
        for (_, field) in &self.fields {
            field.index.remove(doc_id);
        }
    }

    /// Score `words` against every field and combine by key-wise max —
    /// a document is only as relevant as its single best-matching field.
    pub fn search(&self, words: &[String], restrict_to: Option<&std::collections::HashSet<DocId>>) -> ScoreMap {
        let per_field: Vec<ScoreMap> = self
            .fields
            .iter()
            .map(|(_, field)| field.index.search_words(words, field.weight, restrict_to))
            .collect();
        ScoreMap::max(per_field.iter())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}
