// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tag predicates: `scope:value` literals combined into a conjunctive
//! required/forbidden filter over a document's tag set.
//!
//! The three `is:discontinued`/`is:unlisted`/`is:legacy` flags are forbidden
//! by default, but that default lives one layer up (in [`crate::query`] and
//! [`crate::form`]) rather than on [`TagPredicate`] itself — a predicate here
//! is exactly the required/forbidden sets it was built from, nothing more.

use std::collections::HashSet;

/// A `scope:value` literal, e.g. `"sdk:flutter"` or `"is:discontinued"`.
pub type Tag = String;

/// The flags forbidden unless the query explicitly mentions them via
/// `is:X` or `show:X`, in the fixed order the wire format negates them in.
pub const DEFAULT_FORBIDDEN: [&str; 3] = ["is:discontinued", "is:unlisted", "is:legacy"];

/// Default-forbidden flags not present in `mentioned`, in [`DEFAULT_FORBIDDEN`]
/// order. `mentioned` is the set of default flags the query named via `is:X`
/// or `show:X` (see [`crate::query::parse`]).
pub fn unsuppressed_defaults(mentioned: &HashSet<Tag>) -> Vec<Tag> {
    DEFAULT_FORBIDDEN
        .iter()
        .filter(|flag| !mentioned.contains(**flag))
        .map(|flag| (*flag).to_string())
        .collect()
}

/// A conjunctive filter: a document matches iff it carries every required
/// tag and none of the forbidden ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPredicate {
    required: Vec<Tag>,
    forbidden: Vec<Tag>,
}

impl TagPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&self) -> &[Tag] {
        &self.required
    }

    pub fn forbidden(&self) -> &[Tag] {
        &self.forbidden
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.forbidden.is_empty()
    }

    /// Append `tag` to the required set if it isn't already present.
    pub fn with_required(&self, tag: &str) -> Self {
        let mut next = self.clone();
        if !next.required.iter().any(|t| t == tag) {
            next.required.push(tag.to_string());
        }
        next
    }

    /// Append `tag` to the forbidden set if it isn't already present.
    pub fn with_forbidden(&self, tag: &str) -> Self {
        let mut next = self.clone();
        if !next.forbidden.iter().any(|t| t == tag) {
            next.forbidden.push(tag.to_string());
        }
        next
    }

    /// Flip `tag`'s required membership: drop it if present, append it if
    /// absent. Used to implement filter-chip toggling in the search form.
    pub fn toggle(&self, tag: &str) -> Self {
        let mut next = self.clone();
        if let Some(pos) = next.required.iter().position(|t| t == tag) {
            next.required.remove(pos);
        } else {
            next.required.push(tag.to_string());
        }
        next
    }

    pub fn matches(&self, doc_tags: &HashSet<Tag>) -> bool {
        self.required.iter().all(|t| doc_tags.contains(t))
            && self.forbidden.iter().all(|t| !doc_tags.contains(t))
    }

    /// Serialize to the literal list used both in URL query parameters and
    /// the search-service wire format: required tags verbatim, forbidden
    /// tags prefixed with `-`, required first in original order.
    pub fn to_literals(&self) -> Vec<String> {
        let mut out: Vec<String> = self.required.clone();
        out.extend(self.forbidden.iter().map(|t| format!("-{t}")));
        out
    }

    /// Reconstruct a predicate from the wire literal list produced by
    /// [`Self::to_literals`] (a `-`-prefixed entry is forbidden, anything
    /// else is required).
    pub fn from_literals<'a, I: IntoIterator<Item = &'a str>>(literals: I) -> Self {
        let mut predicate = Self::new();
        for literal in literals {
            predicate = match literal.strip_prefix('-') {
                Some(tag) => predicate.with_forbidden(tag),
                None => predicate.with_required(literal),
            };
        }
        predicate
    }
}
