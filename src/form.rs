// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search form: the bidirectional bridge between URL query parameters and a
//! [`ParsedQuery`], plus pagination and canonical link generation.

use std::collections::HashMap;

use crate::error::FormError;
use crate::query::{self, Ordering, ParsedQuery};
use crate::tags::unsuppressed_defaults;

const DEFAULT_PAGE_SIZE: i64 = 10;

/// The UI scope a form was rendered in — the plain `/packages` search, or a
/// publisher/SDK-scoped variant. Carried through unchanged; it does not
/// affect parsing or scoring, only how a caller might render the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    Regular,
    Publisher(String),
    Sdk(String),
}

/// A parsed, paginated search form, constructed either directly from a
/// query string or from a URL parameter map.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    context: Context,
    query_text: String,
    parsed: ParsedQuery,
    current_page: i64,
    page_size: i64,
}

impl SearchForm {
    /// Build a form directly from a raw query string, defaulting to page 1.
    pub fn new(query_text: &str, current_page: Option<i64>) -> Result<Self, FormError> {
        let page = current_page.unwrap_or(1);
        Self::build(Context::Regular, query_text.to_string(), page, DEFAULT_PAGE_SIZE)
    }

    /// Build a form from a URL parameter map: recognizes `q`, `page`, `sort`.
    pub fn parse(context: Context, params: &HashMap<String, String>) -> Result<Self, FormError> {
        let query_text = params.get("q").cloned().unwrap_or_default();
        let page = match params.get("page") {
            None => 1,
            Some(raw) => raw.parse::<i64>().map_err(|_| FormError::NotAnInteger {
                field: "page",
                value: raw.clone(),
            })?,
        };
        let mut form = Self::build(context, query_text, page, DEFAULT_PAGE_SIZE)?;
        if let Some(sort) = params.get("sort") {
            if let Some(ordering) = Ordering::parse(sort) {
                form.parsed.ordering = ordering;
            }
        }
        Ok(form)
    }

    fn build(context: Context, query_text: String, page: i64, page_size: i64) -> Result<Self, FormError> {
        if page < 1 {
            return Err(FormError::InvalidPage { page });
        }
        if page_size < 1 {
            return Err(FormError::InvalidLimit { limit: page_size });
        }
        let mut parsed = query::parse(&query_text);
        parsed.offset = (page - 1) * page_size;
        parsed.limit = page_size;
        Ok(Self {
            context,
            query_text,
            parsed,
            current_page: page,
            page_size,
        })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn parsed_query(&self) -> &ParsedQuery {
        &self.parsed
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    /// Flip `tag`'s required membership and re-derive the canonical query
    /// text, current page reset to 1 (a changed filter starts a new result
    /// set).
    pub fn toggle_required_tag(&self, tag: &str) -> Self {
        let toggled_tags = self.parsed.tags.toggle(tag);
        let mut next = self.clone();
        next.parsed.tags = toggled_tags;
        next.current_page = 1;
        next.parsed.offset = 0;
        next.query_text = next.canonical_raw_query();
        next
    }

    /// The canonical, unencoded query text: required tags (in their current
    /// order) followed by the free-text words.
    fn canonical_raw_query(&self) -> String {
        let mut parts: Vec<String> = self.parsed.tags.required().to_vec();
        if !self.parsed.text.is_empty() {
            parts.push(self.parsed.text.clone());
        }
        parts.join(" ")
    }

    /// Build the canonical `/packages` link: `q` with spaces as `+` and `:`
    /// escaped as `%3A`, then `page` (omitted at page 1), then `sort`
    /// (omitted at the default ordering).
    pub fn to_search_link(&self, page: Option<i64>) -> String {
        let page = page.unwrap_or(self.current_page);
        let mut url = format!("/packages?q={}", percent_encode_q(&self.canonical_raw_query()));
        if page != 1 {
            url.push_str(&format!("&page={page}"));
        }
        if let Some(sort) = self.parsed.ordering.as_param() {
            url.push_str(&format!("&sort={sort}"));
        }
        url
    }

    /// Build the wire-format query handed to the search service.
    pub fn to_service_query(&self) -> ServiceQuery {
        let mut tags = self.parsed.tags.to_literals();
        for flag in unsuppressed_defaults(&self.parsed.mentioned_defaults) {
            tags.push(format!("-{flag}"));
        }
        ServiceQuery {
            text: self.canonical_raw_query(),
            tags,
            offset: self.parsed.offset,
            limit: self.parsed.limit,
            sort: self.parsed.ordering.as_param().map(str::to_string),
        }
    }
}

fn percent_encode_q(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            ' ' => out.push('+'),
            ':' => out.push_str("%3A"),
            other => out.push(other),
        }
    }
    out
}

/// The wire-format request handed to [`crate::service::SearchService`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceQuery {
    pub text: String,
    pub tags: Vec<String>,
    pub offset: i64,
    pub limit: i64,
    pub sort: Option<String>,
}

impl ServiceQuery {
    /// The flattened `(key, value)` pairs used in S3's
    /// `to_uri_query_parameters()` example: `q`, `tags` (joined by comma),
    /// `offset`, `limit`, and `sort` when present.
    pub fn to_uri_query_parameters(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("q".to_string(), self.text.clone());
        params.insert("tags".to_string(), self.tags.join(","));
        params.insert("offset".to_string(), self.offset.to_string());
        params.insert("limit".to_string(), self.limit.to_string());
        if let Some(sort) = &self.sort {
            params.insert("sort".to_string(), sort.clone());
        }
        params
    }
}
