// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A [`CorpusProvider`] backed by a single JSON snapshot file, for the CLI
//! demo and integration tests. Not a production corpus source — the real
//! registry backend is out of scope here (see `spec.md` §1).

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ServiceError;
use crate::score::DocId;
use crate::service::{CorpusDocument, CorpusProvider};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    fields: HashMap<String, String>,
    #[serde(default)]
    tags: HashSet<String>,
    #[serde(default)]
    ordering_fields: HashMap<String, f64>,
}

/// Reads `{doc_id: {fields, tags, ordering_fields}}` from a JSON file on
/// every [`CorpusProvider::snapshot`] call, so external edits to the file
/// are picked up on the next `rebuild`.
pub struct JsonCorpusProvider {
    path: std::path::PathBuf,
}

impl JsonCorpusProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CorpusProvider for JsonCorpusProvider {
    fn snapshot(&self) -> Result<HashMap<DocId, CorpusDocument>, ServiceError> {
        let text = fs::read_to_string(&self.path).map_err(|e| ServiceError::CorpusUnavailable {
            reason: format!("reading {}: {e}", self.path.display()),
        })?;
        let raw: HashMap<DocId, RawDocument> =
            serde_json::from_str(&text).map_err(|e| ServiceError::CorpusUnavailable {
                reason: format!("parsing {}: {e}", self.path.display()),
            })?;
        Ok(raw
            .into_iter()
            .map(|(id, doc)| {
                (
                    id,
                    CorpusDocument {
                        fields: doc.fields,
                        tags: doc.tags,
                        ordering_fields: doc.ordering_fields,
                    },
                )
            })
            .collect())
    }
}
