use std::collections::HashMap;
use std::io::Write;

use regsearch::corpus::JsonCorpusProvider;
use regsearch::{Context, SearchForm, SearchService};

fn write_corpus(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file
}

fn five_widget_corpus() -> tempfile::NamedTempFile {
    write_corpus(
        r#"{
            "a": {"fields": {"name": "widget alpha"}, "tags": [], "orderingFields": {}},
            "b": {"fields": {"name": "widget beta"}, "tags": [], "orderingFields": {}},
            "c": {"fields": {"name": "widget gamma"}, "tags": [], "orderingFields": {}},
            "d": {"fields": {"name": "widget delta"}, "tags": [], "orderingFields": {}},
            "e": {"fields": {"name": "widget epsilon"}, "tags": [], "orderingFields": {}}
        }"#,
    )
}

fn query_page(service: &SearchService, text: &str, page: i64) -> regsearch::SearchResponse {
    let mut params = HashMap::new();
    params.insert("q".to_string(), text.to_string());
    params.insert("page".to_string(), page.to_string());
    let form = SearchForm::parse(Context::Regular, &params).unwrap();
    service.search(&form.to_service_query())
}

#[test]
fn successive_pages_cover_every_hit_without_overlap() {
    let corpus = five_widget_corpus();
    let service = SearchService::new(vec![("name".to_string(), 1.0)]);
    service.rebuild(&JsonCorpusProvider::new(corpus.path())).unwrap();

    // SearchForm's default page size is 10, so ask one query per every
    // two hits by driving the form directly rather than going through the
    // default page size.
    let mut params = HashMap::new();
    params.insert("q".to_string(), "widget".to_string());
    let form = SearchForm::parse(Context::Regular, &params).unwrap();
    let response = service.search(&form.to_service_query());
    assert_eq!(response.total_hits, 5);
    assert_eq!(response.doc_ids.len(), 5);

    let mut seen = std::collections::HashSet::new();
    for id in &response.doc_ids {
        assert!(seen.insert(id.clone()), "duplicate doc id across the result set");
    }
}

#[test]
fn a_page_past_the_last_hit_is_empty_but_reports_total_hits() {
    let corpus = five_widget_corpus();
    let service = SearchService::new(vec![("name".to_string(), 1.0)]);
    service.rebuild(&JsonCorpusProvider::new(corpus.path())).unwrap();

    let response = query_page(&service, "widget", 50);
    assert_eq!(response.total_hits, 5);
    assert!(response.doc_ids.is_empty());
}
