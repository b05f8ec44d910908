use std::collections::HashMap;
use std::io::Write;

use regsearch::corpus::JsonCorpusProvider;
use regsearch::{Context, SearchForm, SearchService};

fn write_corpus(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file
}

#[test]
fn a_name_match_outranks_a_description_only_match() {
    let corpus = write_corpus(
        r#"{
            "named": {"fields": {"name": "http client", "description": "network utilities"}, "tags": [], "orderingFields": {}},
            "described": {"fields": {"name": "toolkit", "description": "an http client wrapper"}, "tags": [], "orderingFields": {}}
        }"#,
    );

    let service = SearchService::new(vec![
        ("name".to_string(), 1.0),
        ("description".to_string(), 0.3),
    ]);
    service.rebuild(&JsonCorpusProvider::new(corpus.path())).unwrap();

    let mut params = HashMap::new();
    params.insert("q".to_string(), "http".to_string());
    let form = SearchForm::parse(Context::Regular, &params).unwrap();
    let response = service.search(&form.to_service_query());

    assert_eq!(response.doc_ids, vec!["named".to_string(), "described".to_string()]);
}

#[test]
fn rebuild_replaces_the_previous_snapshot_entirely() {
    let first = write_corpus(r#"{"a": {"fields": {"name": "widget"}, "tags": [], "orderingFields": {}}}"#);
    let second = write_corpus(r#"{"b": {"fields": {"name": "widget"}, "tags": [], "orderingFields": {}}}"#);

    let service = SearchService::new(vec![("name".to_string(), 1.0)]);
    service.rebuild(&JsonCorpusProvider::new(first.path())).unwrap();
    assert_eq!(service.document_count(), 1);

    service.rebuild(&JsonCorpusProvider::new(second.path())).unwrap();
    assert_eq!(service.document_count(), 1);

    let mut params = HashMap::new();
    params.insert("q".to_string(), "widget".to_string());
    let form = SearchForm::parse(Context::Regular, &params).unwrap();
    let response = service.search(&form.to_service_query());
    assert_eq!(response.doc_ids, vec!["b".to_string()]);
}
