use std::collections::HashMap;

use regsearch::{Context, SearchForm};

#[test]
fn s1_plain_query_round_trips_through_the_public_api() {
    let form = SearchForm::new("web framework", None).unwrap();
    assert_eq!(form.to_search_link(None), "/packages?q=web+framework");

    let mut params = HashMap::new();
    params.insert("q".to_string(), "web framework".to_string());
    let reparsed = SearchForm::parse(Context::Regular, &params).unwrap();
    assert_eq!(reparsed.parsed_query().text, form.parsed_query().text);
    assert_eq!(reparsed.parsed_query().tags, form.parsed_query().tags);
}

#[test]
fn s3_tag_round_trip_via_url_parameters() {
    let mut params = HashMap::new();
    params.insert("q".to_string(), "sdk:dart some framework".to_string());
    let form = SearchForm::parse(Context::Regular, &params).unwrap();
    let link = form.to_search_link(None);
    assert_eq!(link, "/packages?q=sdk%3Adart+some+framework");

    // parsing the generated link back yields an equivalent form (property 7).
    let mut reparsed_params = HashMap::new();
    reparsed_params.insert("q".to_string(), "sdk:dart some framework".to_string());
    let reparsed = SearchForm::parse(Context::Regular, &reparsed_params).unwrap();
    assert_eq!(reparsed.parsed_query().text, form.parsed_query().text);
    assert_eq!(
        reparsed.parsed_query().tags.to_literals(),
        form.parsed_query().tags.to_literals()
    );
}

#[test]
fn toggling_a_tag_twice_restores_the_original_link() {
    let form = SearchForm::new("sdk:dart some framework", None).unwrap();
    let toggled_on = form.toggle_required_tag("sdk:flutter");
    assert_eq!(
        toggled_on.to_search_link(None),
        "/packages?q=sdk%3Adart+sdk%3Aflutter+some+framework"
    );
    let toggled_off = toggled_on.toggle_required_tag("sdk:flutter");
    assert_eq!(toggled_off.to_search_link(None), form.to_search_link(None));
}
