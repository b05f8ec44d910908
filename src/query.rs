// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query parser: turns a raw, user-typed query string into free text
//! plus a tag predicate. Total — every input, including the empty string,
//! yields a [`ParsedQuery`]; there is no error channel here.

use std::collections::HashSet;

use crate::tags::{Tag, TagPredicate, DEFAULT_FORBIDDEN};

/// Result ordering. `Relevance` is the default; every other variant sorts
/// by a corpus-provided ordering field instead of the text score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    #[default]
    Relevance,
    Top,
    Updated,
    Created,
    Popularity,
    Likes,
    Points,
}

impl Ordering {
    /// Parse a `sort` URL parameter value; unknown values are ignored
    /// (treated as `None`, leaving the current ordering untouched).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Ordering::Top),
            "updated" => Some(Ordering::Updated),
            "created" => Some(Ordering::Created),
            "popularity" => Some(Ordering::Popularity),
            "likes" => Some(Ordering::Likes),
            "points" => Some(Ordering::Points),
            "relevance" => Some(Ordering::Relevance),
            _ => None,
        }
    }

    /// The `sort` URL parameter value, or `None` for the default
    /// (`relevance`, which is elided from generated links).
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Ordering::Relevance => None,
            Ordering::Top => Some("top"),
            Ordering::Updated => Some("updated"),
            Ordering::Created => Some("created"),
            Ordering::Popularity => Some("popularity"),
            Ordering::Likes => Some("likes"),
            Ordering::Points => Some("points"),
        }
    }
}

const DEFAULT_PAGE_SIZE: i64 = 10;

/// The normalized representation of a search query: free text, a tag
/// predicate, the set of default-forbidden flags explicitly mentioned (via
/// `is:X` or `show:X`), ordering, and pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub text: String,
    pub tags: TagPredicate,
    pub mentioned_defaults: HashSet<Tag>,
    pub ordering: Ordering,
    pub offset: i64,
    pub limit: i64,
}

impl Default for ParsedQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            tags: TagPredicate::new(),
            mentioned_defaults: HashSet::new(),
            ordering: Ordering::default(),
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Parse `raw` into a [`ParsedQuery`] with default ordering/pagination;
/// callers that need a particular page/sort apply them on top (see
/// [`crate::form::SearchForm`]).
pub fn parse(raw: &str) -> ParsedQuery {
    let mut text_words = Vec::new();
    let mut tags = TagPredicate::new();
    let mut mentioned_defaults = HashSet::new();

    for token in raw.split_whitespace() {
        match tag_literal(token) {
            Some((scope, value)) => {
                let tag = format!("{scope}:{value}");
                if scope == "is" && is_default_flag_value(value) {
                    let canonical = format!("is:{value}");
                    tags = tags.with_required(&tag);
                    mentioned_defaults.insert(canonical);
                } else if scope == "show" && value == "hidden" {
                    mentioned_defaults.extend(DEFAULT_FORBIDDEN.iter().map(|f| f.to_string()));
                } else if scope == "show" && is_default_flag_value(value) {
                    mentioned_defaults.insert(format!("is:{value}"));
                } else {
                    tags = tags.with_required(&tag);
                }
            }
            None => text_words.push(token.to_string()),
        }
    }

    ParsedQuery {
        text: text_words.join(" "),
        tags,
        mentioned_defaults,
        ..ParsedQuery::default()
    }
}

fn is_default_flag_value(value: &str) -> bool {
    matches!(value, "discontinued" | "unlisted" | "legacy")
}

/// A token is a tag literal iff it matches `[a-z]+:[a-zA-Z0-9_.-]+` exactly:
/// a lowercase-alphabetic scope, a single colon, and a non-empty value made
/// only of alphanumerics, `_`, `.`, or `-`.
fn tag_literal(token: &str) -> Option<(&str, &str)> {
    let colon = token.find(':')?;
    let (scope, rest) = token.split_at(colon);
    let value = &rest[1..];
    if scope.is_empty() || !scope.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    if value.is_empty()
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return None;
    }
    Some((scope, value))
}
