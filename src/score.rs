// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The scalar score map: a sparse, pure `doc-id → non-negative real` mapping
//! with the union/intersection/top-k/threshold operators the rest of the
//! search core is built from.
//!
//! A missing key is always equivalent to `0.0`; `NaN` and negative values
//! never enter the map (sanitized away at construction, never produced by
//! any operation here). No operation mutates its inputs.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Opaque document identifier, stable across updates of the same logical
/// document.
pub type DocId = String;

/// A sparse `doc-id → score` mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap {
    values: HashMap<DocId, f64>,
}

impl ScoreMap {
    /// Build a score map from a raw mapping, dropping any `NaN` or negative
    /// value (a missing key and a zero-valued key are equivalent anyway).
    pub fn new(values: HashMap<DocId, f64>) -> Self {
        let values = values
            .into_iter()
            .filter(|(_, v)| v.is_finite() && *v >= 0.0)
            .collect();
        Self { values }
    }

    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Highest score in the map, or `0.0` if empty.
    pub fn max_value(&self) -> f64 {
        self.values.values().copied().fold(0.0, f64::max)
    }

    /// Score for `key`, defaulting to `0.0` when absent.
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    /// All keys, optionally restricted by a predicate.
    pub fn keys(&self, filter: Option<&dyn Fn(&str) -> bool>) -> Vec<DocId> {
        match filter {
            Some(f) => self
                .values
                .keys()
                .filter(|k| f(k))
                .cloned()
                .collect(),
            None => self.values.keys().cloned().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocId, &f64)> {
        self.values.iter()
    }

    /// Keep only entries whose value is >= `max(min_value, fraction *
    /// max_value)`. At least one of `fraction`/`min_value` should be given;
    /// if neither is, the threshold is `0.0` and nothing is pruned.
    pub fn remove_low_values(&self, fraction: Option<f64>, min_value: Option<f64>) -> Self {
        debug_assert!(
            fraction.is_some() || min_value.is_some(),
            "remove_low_values requires at least one of fraction/min_value"
        );
        let max = self.max_value();
        let threshold = min_value
            .unwrap_or(0.0)
            .max(fraction.unwrap_or(0.0) * max);
        let values = self
            .values
            .iter()
            .filter(|(_, v)| **v >= threshold)
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        Self { values }
    }

    /// Restrict to the intersection of this map's keys and `keys`.
    pub fn project<'a, I: IntoIterator<Item = &'a str>>(&self, keys: I) -> Self {
        let wanted: HashSet<&str> = keys.into_iter().collect();
        let values = self
            .values
            .iter()
            .filter(|(k, _)| wanted.contains(k.as_str()))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        Self { values }
    }

    /// Restrict to the intersection of this map's keys and another set of
    /// doc-ids (by reference, avoiding an intermediate `&str` collection).
    pub fn project_ids(&self, ids: &HashSet<DocId>) -> Self {
        let values = self
            .values
            .iter()
            .filter(|(k, _)| ids.contains(*k))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        Self { values }
    }

    /// Transform every value key-wise.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        let values: HashMap<DocId, f64> = self.values.iter().map(|(k, v)| (k.clone(), f(*v))).collect();
        Self::new(values)
    }

    /// The `n` highest-scoring entries, ties broken by ascending doc-id.
    pub fn top(&self, n: usize, min_value: Option<f64>) -> Vec<(DocId, f64)> {
        let mut entries: Vec<(DocId, f64)> = self
            .values
            .iter()
            .filter(|(_, v)| min_value.map_or(true, |m| **v >= m))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        entries.truncate(n);
        entries
    }

    /// Key-wise product restricted to the intersection of every input,
    /// short-circuiting to empty once an intermediate intersection is empty.
    pub fn multiply<'a, I: IntoIterator<Item = &'a ScoreMap>>(maps: I) -> Self {
        let mut iter = maps.into_iter();
        let Some(first) = iter.next() else {
            return Self::empty();
        };
        let mut acc = first.values.clone();
        for m in iter {
            if acc.is_empty() {
                return Self::empty();
            }
            let mut next = HashMap::with_capacity(acc.len().min(m.values.len()));
            for (k, v) in &acc {
                if let Some(v2) = m.values.get(k) {
                    next.insert(k.clone(), v * v2);
                }
            }
            acc = next;
        }
        Self { values: acc }
    }

    /// Key-wise maximum; union of all keys.
    pub fn max<'a, I: IntoIterator<Item = &'a ScoreMap>>(maps: I) -> Self {
        let mut values: HashMap<DocId, f64> = HashMap::new();
        for m in maps {
            for (k, v) in &m.values {
                values
                    .entry(k.clone())
                    .and_modify(|existing| {
                        if *v > *existing {
                            *existing = *v;
                        }
                    })
                    .or_insert(*v);
            }
        }
        Self { values }
    }
}

impl FromIterator<(DocId, f64)> for ScoreMap {
    fn from_iter<T: IntoIterator<Item = (DocId, f64)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
