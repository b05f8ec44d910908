use std::collections::HashMap;
use std::io::Write;

use regsearch::corpus::JsonCorpusProvider;
use regsearch::{Context, SearchForm, SearchService};

fn write_corpus(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file
}

fn mixed_visibility_corpus() -> tempfile::NamedTempFile {
    write_corpus(
        r#"{
            "active": {"fields": {"name": "widget toolkit"}, "tags": [], "orderingFields": {}},
            "gone": {"fields": {"name": "widget toolkit"}, "tags": ["is:discontinued"], "orderingFields": {}},
            "hidden_pkg": {"fields": {"name": "widget toolkit"}, "tags": ["is:unlisted"], "orderingFields": {}}
        }"#,
    )
}

fn search(service: &SearchService, query_text: &str) -> Vec<String> {
    let mut params = HashMap::new();
    params.insert("q".to_string(), query_text.to_string());
    let form = SearchForm::parse(Context::Regular, &params).unwrap();
    service.search(&form.to_service_query()).doc_ids
}

#[test]
fn plain_query_excludes_discontinued_and_unlisted_by_default() {
    let corpus = mixed_visibility_corpus();
    let service = SearchService::new(vec![("name".to_string(), 1.0)]);
    service.rebuild(&JsonCorpusProvider::new(corpus.path())).unwrap();

    let hits = search(&service, "widget");
    assert_eq!(hits, vec!["active".to_string()]);
}

#[test]
fn is_discontinued_un_suppresses_only_that_flag() {
    let corpus = mixed_visibility_corpus();
    let service = SearchService::new(vec![("name".to_string(), 1.0)]);
    service.rebuild(&JsonCorpusProvider::new(corpus.path())).unwrap();

    let hits = search(&service, "widget is:discontinued");
    let mut sorted = hits;
    sorted.sort();
    assert_eq!(sorted, vec!["active".to_string(), "gone".to_string()]);
}

#[test]
fn show_hidden_surfaces_every_default_forbidden_document() {
    let corpus = mixed_visibility_corpus();
    let service = SearchService::new(vec![("name".to_string(), 1.0)]);
    service.rebuild(&JsonCorpusProvider::new(corpus.path())).unwrap();

    let mut hits = search(&service, "widget show:hidden");
    hits.sort();
    assert_eq!(
        hits,
        vec!["active".to_string(), "gone".to_string(), "hidden_pkg".to_string()]
    );
}
