// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory fielded text search and query-form core for a package
//! registry: turns a user-typed query string into a ranked list of package
//! identifiers.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   ┌────────────┐   ┌───────────────┐   ┌─────────────┐
//! │ analyzer  │──▶│ token_index│──▶│  field_index  │──▶│   service   │
//! │(tokenize) │   │ (postings) │   │ (named fields)│   │ (orchestrate│
//! └───────────┘   └────────────┘   └───────────────┘   │  + corpus)  │
//!                       ▲                                └──────┬──────┘
//!                       │                                       │
//!                 ┌─────┴─────┐                           ┌─────▼─────┐
//!                 │   score   │                           │   tags    │
//!                 │ (ScoreMap)│                           │(predicate)│
//!                 └───────────┘                           └───────────┘
//!                                                                ▲
//!                                                          ┌─────┴─────┐
//!                                                          │   query   │
//!                                                          │  (parser) │
//!                                                          └─────┬─────┘
//!                                                          ┌─────▼─────┐
//!                                                          │   form    │
//!                                                          │(URL <-> Q)│
//!                                                          └───────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use regsearch::corpus::JsonCorpusProvider;
//! use regsearch::form::{Context, SearchForm};
//! use regsearch::service::SearchService;
//! use std::collections::HashMap;
//!
//! let service = SearchService::new(vec![
//!     ("name".to_string(), 1.0),
//!     ("description".to_string(), 0.5),
//! ]);
//! service.rebuild(&JsonCorpusProvider::new("corpus.json")).unwrap();
//!
//! let mut params = HashMap::new();
//! params.insert("q".to_string(), "web framework".to_string());
//! let form = SearchForm::parse(Context::Regular, &params).unwrap();
//! let response = service.search(&form.to_service_query());
//! ```

pub mod analyzer;
pub mod corpus;
pub mod error;
pub mod field_index;
pub mod form;
pub mod query;
pub mod score;
pub mod service;
pub mod tags;
pub mod token_index;

pub use error::{FormError, ServiceError};
pub use form::{Context, SearchForm, ServiceQuery};
pub use query::{Ordering, ParsedQuery};
pub use score::{DocId, ScoreMap};
pub use service::{CorpusDocument, CorpusProvider, SearchResponse, SearchService};
pub use tags::{Tag, TagPredicate};
