// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `regsearch` CLI: build and query an in-memory fielded search index from
//! a JSON corpus snapshot.
//!
//! ```bash
//! # Report index statistics for a corpus snapshot
//! regsearch build ./corpus.json --field name:1.0 --field description:0.5
//!
//! # Run one query against a snapshot
//! regsearch query ./corpus.json "sdk:dart some framework" --field name:1.0 --field description:0.5
//! ```

use clap::Parser;
use std::collections::HashMap;

use regsearch::corpus::JsonCorpusProvider;
use regsearch::form::{Context, SearchForm};
use regsearch::service::SearchService;

mod cli;
use cli::display::{row, section_bot, section_top};
use cli::{parse_field_weights, Cli, Commands};

const DEFAULT_FIELDS: &[(&str, f64)] = &[
    ("name", 1.0),
    ("description", 0.6),
    ("readme", 0.3),
    ("api_symbols", 0.4),
];

fn resolve_fields(fields: &[String]) -> Vec<(String, f64)> {
    if fields.is_empty() {
        DEFAULT_FIELDS
            .iter()
            .map(|(name, weight)| (name.to_string(), *weight))
            .collect()
    } else {
        parse_field_weights(fields)
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { corpus, fields } => build_command(&corpus, &fields),
        Commands::Query {
            corpus,
            fields,
            query,
            page,
            sort,
        } => query_command(&corpus, &fields, &query, page, sort.as_deref()),
    }
}

fn build_command(corpus_path: &str, fields: &[String]) {
    let field_weights = resolve_fields(fields);
    let provider = JsonCorpusProvider::new(corpus_path);
    let service = SearchService::new(field_weights.clone());
    if let Err(e) = service.rebuild(&provider) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    section_top("INDEX");
    row(&format!("documents: {}", service.document_count()));
    row(&format!(
        "fields: {}",
        field_weights
            .iter()
            .map(|(name, weight)| format!("{name}({weight})"))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    section_bot();
}

fn query_command(corpus_path: &str, fields: &[String], query: &str, page: i64, sort: Option<&str>) {
    let field_weights = resolve_fields(fields);
    let provider = JsonCorpusProvider::new(corpus_path);
    let service = SearchService::new(field_weights);
    if let Err(e) = service.rebuild(&provider) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let mut params = HashMap::new();
    params.insert("q".to_string(), query.to_string());
    params.insert("page".to_string(), page.to_string());
    if let Some(sort) = sort {
        params.insert("sort".to_string(), sort.to_string());
    }

    let form = match SearchForm::parse(Context::Regular, &params) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let response = service.search(&form.to_service_query());

    section_top(&format!("RESULTS for \"{query}\""));
    row(&format!("total hits: {}", response.total_hits));
    for (rank, doc_id) in response.doc_ids.iter().enumerate() {
        row(&format!("{:>3}. {}", rank + 1, doc_id));
    }
    section_bot();
}
