// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search service: orchestrates corpus loading, tag filtering, field
//! scoring, pruning, ordering, and pagination into one stateless call per
//! query.
//!
//! The service holds exactly one [`FieldCollectionIndex`] plus the per-doc
//! tag sets and ordering fields needed for filtering/sorting, all behind one
//! [`parking_lot::RwLock`]. A [`Self::rebuild`] call produces a brand new
//! snapshot and swaps it in atomically — readers in flight keep the old
//! snapshot (an `Arc` clone) until they finish; no reader ever observes a
//! partially rebuilt index.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::analyzer::split_for_indexing;
use crate::error::ServiceError;
use crate::field_index::FieldCollectionIndex;
use crate::query::{self, Ordering};
use crate::score::DocId;
use crate::tags::{Tag, TagPredicate};

/// One document as the corpus provider reports it: field text for scoring,
/// the tag set for filtering, and named ordering fields for non-relevance
/// sorts (e.g. `updated`, `popularity`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusDocument {
    pub fields: HashMap<String, String>,
    pub tags: HashSet<Tag>,
    pub ordering_fields: HashMap<String, f64>,
}

/// The corpus provider boundary: the only I/O surface the search core has.
pub trait CorpusProvider {
    fn snapshot(&self) -> Result<HashMap<DocId, CorpusDocument>, ServiceError>;
}

struct Snapshot {
    index: FieldCollectionIndex,
    tags: HashMap<DocId, HashSet<Tag>>,
    ordering_fields: HashMap<DocId, HashMap<String, f64>>,
}

impl Snapshot {
    fn empty(field_weights: Vec<(String, f64)>) -> Self {
        Self {
            index: FieldCollectionIndex::new(field_weights),
            tags: HashMap::new(),
            ordering_fields: HashMap::new(),
        }
    }
}

/// `(total_hits, doc_ids)`: `doc_ids` is already sliced to the requested
/// page; `total_hits` is the count before slicing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    pub total_hits: usize,
    pub doc_ids: Vec<DocId>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

pub struct SearchService {
    field_weights: Vec<(String, f64)>,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl SearchService {
    /// Build a service with no documents yet; call [`Self::rebuild`] before
    /// serving queries.
    pub fn new(field_weights: Vec<(String, f64)>) -> Self {
        let snapshot = Snapshot::empty(field_weights.clone());
        Self {
            field_weights,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Pull a fresh snapshot from `provider`, build a brand-new index from
    /// it, and swap it in. Readers mid-query keep using the old snapshot.
    pub fn rebuild(&self, provider: &dyn CorpusProvider) -> Result<(), ServiceError> {
        let documents = provider.snapshot()?;
        let index = FieldCollectionIndex::new(self.field_weights.clone());
        index.rebuild(documents.iter().map(|(id, doc)| (id.as_str(), &doc.fields)));

        let mut tags = HashMap::with_capacity(documents.len());
        let mut ordering_fields = HashMap::with_capacity(documents.len());
        for (doc_id, doc) in &documents {
            tags.insert(doc_id.clone(), doc.tags.clone());
            ordering_fields.insert(doc_id.clone(), doc.ordering_fields.clone());
        }
        let snapshot = Arc::new(Snapshot {
            index,
            tags,
            ordering_fields,
        });
        *self.snapshot.write() = snapshot;
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.snapshot.read().tags.len()
    }

    /// Run one query end to end: tag filter, field scoring restricted to
    /// the tag-filtered candidates, noise pruning, ordering, pagination.
    pub fn search(&self, query: &crate::form::ServiceQuery) -> SearchResponse {
        let snapshot = self.snapshot.read().clone();

        let predicate = TagPredicate::from_literals(query.tags.iter().map(String::as_str));
        let candidates: HashSet<DocId> = snapshot
            .tags
            .iter()
            .filter(|(_, tags)| predicate.matches(tags))
            .map(|(id, _)| id.clone())
            .collect();
        if candidates.is_empty() {
            return SearchResponse::empty();
        }

        let ordering = query
            .sort
            .as_deref()
            .and_then(Ordering::parse)
            .unwrap_or_default();

        let ordered_ids: Vec<DocId> = match ordering {
            Ordering::Relevance => {
                let free_text = query::parse(&query.text).text;
                let words = split_for_indexing(&free_text);
                // Open question (spec §9): zero free-text words under
                // relevance ordering skips scoring entirely and yields an
                // empty result, rather than "matching everything".
                if words.is_empty() {
                    return SearchResponse::empty();
                }
                let scores = snapshot
                    .index
                    .search(&words, Some(&candidates))
                    .remove_low_values(Some(0.01), None);
                let ranked = scores.top(scores.len(), None);
                ranked.into_iter().map(|(id, _)| id).collect()
            }
            other => {
                // Non-relevance orderings ignore text relevance entirely —
                // every tag-matching document is returned, ordered by the
                // corpus-provided field.
                let field_key = other
                    .as_param()
                    .expect("non-relevance ordering always names a field");
                let mut ids: Vec<DocId> = candidates.into_iter().collect();
                ids.sort_by(|a, b| {
                    let va = ordering_field_value(&snapshot, a, field_key);
                    let vb = ordering_field_value(&snapshot, b, field_key);
                    vb.partial_cmp(&va).unwrap_or(CmpOrdering::Equal).then_with(|| a.cmp(b))
                });
                ids
            }
        };

        let total_hits = ordered_ids.len();
        let offset = query.offset.max(0) as usize;
        let limit = query.limit.max(0) as usize;
        let doc_ids = ordered_ids.into_iter().skip(offset).take(limit).collect();
        SearchResponse { total_hits, doc_ids }
    }
}

fn ordering_field_value(snapshot: &Snapshot, doc_id: &str, field_key: &str) -> f64 {
    snapshot
        .ordering_fields
        .get(doc_id)
        .and_then(|fields| fields.get(field_key))
        .copied()
        .unwrap_or(0.0)
}
