use std::collections::HashMap;

use proptest::prelude::*;
use proptest::string::string_regex;

use regsearch::token_index::TokenIndex;
use regsearch::{Context, SearchForm, ScoreMap};

fn word_strategy() -> impl Strategy<Value = String> {
    string_regex("[a-z]{2,8}").unwrap()
}

fn score_map_strategy() -> impl Strategy<Value = ScoreMap> {
    prop::collection::hash_map(word_strategy(), 0.0_f64..1.0, 0..6)
        .prop_map(|values| values.into_iter().collect())
}

proptest! {
    #[test]
    fn add_then_remove_restores_prior_counts(doc_id in word_strategy(), text in word_strategy()) {
        let index = TokenIndex::new();
        let tokens_before = index.token_count();
        let docs_before = index.document_count();
        index.add(&doc_id, Some(&text));
        index.remove(&doc_id);
        prop_assert_eq!(index.token_count(), tokens_before);
        prop_assert_eq!(index.document_count(), docs_before);
    }

    #[test]
    fn readding_identical_text_is_a_no_op(doc_id in word_strategy(), text in word_strategy()) {
        let index = TokenIndex::new();
        index.add(&doc_id, Some(&text));
        let docs_after_first = index.document_count();
        let tokens_after_first = index.token_count();
        index.add(&doc_id, Some(&text));
        prop_assert_eq!(index.document_count(), docs_after_first);
        prop_assert_eq!(index.token_count(), tokens_after_first);
    }

    #[test]
    fn search_words_is_empty_for_a_word_present_in_no_field(word in word_strategy(), other in word_strategy()) {
        prop_assume!(!other.starts_with(&word) && !word.starts_with(&other));
        let index = TokenIndex::new();
        index.add("a", Some(&other));
        let words = vec![word];
        prop_assert!(index.search_words(&words, 1.0, None).is_empty());
    }

    #[test]
    fn multiply_single_map_is_identity(s in score_map_strategy()) {
        let result = ScoreMap::multiply([&s]);
        prop_assert_eq!(result, s);
    }

    #[test]
    fn multiply_with_empty_is_always_empty(s in score_map_strategy()) {
        let empty = ScoreMap::empty();
        let result = ScoreMap::multiply([&s, &empty]);
        prop_assert!(result.is_empty());
    }

    #[test]
    fn multiply_is_commutative(a in score_map_strategy(), b in score_map_strategy()) {
        let ab = ScoreMap::multiply([&a, &b]);
        let ba = ScoreMap::multiply([&b, &a]);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn max_is_idempotent(a in score_map_strategy()) {
        let once = ScoreMap::max([&a]);
        let twice = ScoreMap::max([&once]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn max_is_commutative(a in score_map_strategy(), b in score_map_strategy()) {
        let ab = ScoreMap::max([&a, &b]);
        let ba = ScoreMap::max([&b, &a]);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn remove_low_values_never_keeps_a_value_below_the_threshold(s in score_map_strategy(), fraction in 0.0_f64..1.0) {
        let pruned = s.remove_low_values(Some(fraction), None);
        let threshold = fraction * s.max_value();
        for (_, v) in pruned.iter() {
            prop_assert!(*v >= threshold);
        }
    }

    #[test]
    fn top_never_returns_more_than_requested(s in score_map_strategy(), n in 0usize..8) {
        let top = s.top(n, None);
        prop_assert!(top.len() <= n);
        prop_assert!(top.len() <= s.len());
    }

    #[test]
    fn top_entries_dominate_every_omitted_entry(s in score_map_strategy(), n in 1usize..4) {
        let top = s.top(n, None);
        let kept: std::collections::HashSet<&String> = top.iter().map(|(k, _)| k).collect();
        let min_kept = top.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        for (k, v) in s.iter() {
            if !kept.contains(k) {
                prop_assert!(*v <= min_kept);
            }
        }
    }

    #[test]
    fn search_form_round_trips_free_text_through_a_generated_link(words in prop::collection::vec(word_strategy(), 1..4)) {
        let text = words.join(" ");
        let form = SearchForm::new(&text, None).unwrap();
        let link = form.to_search_link(None);

        let q = link.strip_prefix("/packages?q=").unwrap().split('&').next().unwrap();
        let decoded = q.replace('+', " ");

        let mut params = HashMap::new();
        params.insert("q".to_string(), decoded);
        let reparsed = SearchForm::parse(Context::Regular, &params).unwrap();
        prop_assert_eq!(reparsed.parsed_query().text.clone(), form.parsed_query().text.clone());
    }
}
