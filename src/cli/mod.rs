// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the `regsearch` command-line interface.
//!
//! Two subcommands: `build` loads a JSON corpus snapshot and reports index
//! statistics (no index is ever persisted — it is always rebuilt from the
//! corpus provider), and `query` runs one query string against a snapshot
//! and prints the ranked results.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "regsearch",
    about = "Fielded text search and query-form core for a package registry",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a JSON corpus snapshot, build the field-collection index, and
    /// report statistics.
    Build {
        /// Path to a JSON corpus snapshot file.
        corpus: String,

        /// Field name and weight, e.g. `name:1.0`. Repeatable.
        #[arg(long = "field", value_name = "NAME:WEIGHT")]
        fields: Vec<String>,
    },

    /// Run one query against a JSON corpus snapshot and print the ranked
    /// results.
    Query {
        /// Path to a JSON corpus snapshot file.
        corpus: String,

        /// Field name and weight, e.g. `name:1.0`. Repeatable.
        #[arg(long = "field", value_name = "NAME:WEIGHT")]
        fields: Vec<String>,

        /// The raw query string, e.g. `"sdk:dart some framework"`.
        query: String,

        /// 1-based page index.
        #[arg(long, default_value = "1")]
        page: i64,

        /// Ordering: relevance (default), top, updated, created,
        /// popularity, likes, points.
        #[arg(long)]
        sort: Option<String>,
    },
}

/// Parse a repeated `--field name:weight` argument list into
/// `(name, weight)` pairs, defaulting to weight `1.0` for fields given
/// without a weight.
pub fn parse_field_weights(fields: &[String]) -> Vec<(String, f64)> {
    fields
        .iter()
        .map(|raw| match raw.split_once(':') {
            Some((name, weight)) => (name.to_string(), weight.parse().unwrap_or(1.0)),
            None => (raw.clone(), 1.0),
        })
        .collect()
}
