// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the search core.
//!
//! No `thiserror`/`anyhow` here — small hand-written enums with manual
//! `Display`/`Error` impls, the way the rest of this crate reports failures
//! (see `verify::types::InvariantError`). The parser and scorer are total
//! and never produce one of these; they exist only at the two fallible
//! boundaries the spec names: malformed pagination input, and a corpus
//! provider that couldn't answer.

use std::fmt;

/// Invalid-input errors surfaced from [`crate::form::SearchForm`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// `page` must be >= 1.
    InvalidPage { page: i64 },
    /// `limit` (page size) must be >= 1.
    InvalidLimit { limit: i64 },
    /// A URL parameter that must be an integer wasn't one.
    NotAnInteger { field: &'static str, value: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InvalidPage { page } => {
                write!(f, "page must be >= 1, got {page}")
            }
            FormError::InvalidLimit { limit } => {
                write!(f, "limit must be >= 1, got {limit}")
            }
            FormError::NotAnInteger { field, value } => {
                write!(f, "{field} must be an integer, got {value:?}")
            }
        }
    }
}

impl std::error::Error for FormError {}

/// Failures surfaced by [`crate::service::SearchService`].
///
/// The service itself is fallible only through its corpus provider; the
/// `InvalidForm` variant exists for callers that hand the service a
/// still-unvalidated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The corpus provider could not produce a snapshot.
    CorpusUnavailable { reason: String },
    /// The query form carried invalid pagination input.
    InvalidForm(FormError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::CorpusUnavailable { reason } => {
                write!(f, "corpus provider unavailable: {reason}")
            }
            ServiceError::InvalidForm(e) => write!(f, "invalid search form: {e}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::InvalidForm(e) => Some(e),
            ServiceError::CorpusUnavailable { .. } => None,
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(e: FormError) -> Self {
        ServiceError::InvalidForm(e)
    }
}
