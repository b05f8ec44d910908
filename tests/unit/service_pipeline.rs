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
fn end_to_end_search_across_corpus_form_and_service() {
    let corpus = write_corpus(
        r#"{
            "http": {
                "fields": {"name": "http", "description": "an http client library"},
                "tags": ["sdk:dart"],
                "orderingFields": {"updated": 3.0}
            },
            "path": {
                "fields": {"name": "path", "description": "filesystem path manipulation"},
                "tags": ["sdk:flutter"],
                "orderingFields": {"updated": 9.0}
            }
        }"#,
    );

    let service = SearchService::new(vec![
        ("name".to_string(), 1.0),
        ("description".to_string(), 0.5),
    ]);
    service.rebuild(&JsonCorpusProvider::new(corpus.path())).unwrap();

    let mut params = HashMap::new();
    params.insert("q".to_string(), "sdk:dart http".to_string());
    let form = SearchForm::parse(Context::Regular, &params).unwrap();

    let response = service.search(&form.to_service_query());
    assert_eq!(response.doc_ids, vec!["http".to_string()]);
}

#[test]
fn alternate_ordering_ignores_text_relevance() {
    let corpus = write_corpus(
        r#"{
            "a": {"fields": {"name": "widget"}, "tags": [], "orderingFields": {"updated": 1.0}},
            "b": {"fields": {"name": "widget"}, "tags": [], "orderingFields": {"updated": 8.0}}
        }"#,
    );
    let service = SearchService::new(vec![("name".to_string(), 1.0)]);
    service.rebuild(&JsonCorpusProvider::new(corpus.path())).unwrap();

    let mut params = HashMap::new();
    params.insert("q".to_string(), "".to_string());
    params.insert("sort".to_string(), "updated".to_string());
    let form = SearchForm::parse(Context::Regular, &params).unwrap();

    let response = service.search(&form.to_service_query());
    assert_eq!(response.doc_ids, vec!["b".to_string(), "a".to_string()]);
}
