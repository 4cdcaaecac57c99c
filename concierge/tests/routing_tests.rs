mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use concierge::intelligence::{KeywordTaxonomy, SpecialistRouter};
use concierge::models::SpecialistId;

fn router() -> SpecialistRouter {
    SpecialistRouter::new(common::registry(), Arc::new(KeywordTaxonomy::default()))
}

fn routed(query: &str) -> SpecialistId {
    let router = router();
    let needs_advice = router.needs_advice(query);
    router.route(query, needs_advice).id
}

#[test]
fn test_advice_queries_go_to_best_scoring_advisor() {
    common::init_test_logger();

    let cases = [
        ("My knee has pain after stretching", SpecialistId::Rachel),
        (
            "How is my hrv and sleep data trending after training?",
            SpecialistId::Advik,
        ),
        ("What should I eat to improve my nutrition?", SpecialistId::Carla),
        ("Can you suggest a travel health plan?", SpecialistId::Neel),
    ];

    for (query, expected) in cases {
        assert_eq!(routed(query), expected, "query: {query}");
    }
}

#[test]
fn test_advice_without_specialty_match_goes_to_default_advisor() {
    assert_eq!(routed("I feel off today"), SpecialistId::Warren);
}

#[test]
fn test_tie_goes_to_first_declared_advisor() {
    // "eat" scores Carla, "pain" scores Rachel; Carla is declared first.
    assert_eq!(routed("What should I eat for the pain?"), SpecialistId::Carla);
    // "workout" scores Advik, "eat" scores Carla; Advik is declared first.
    assert_eq!(routed("What should I eat after my workout?"), SpecialistId::Advik);
}

#[test]
fn test_logistics_and_small_talk_go_to_coordinator() {
    assert_eq!(routed("Can you book a table for Friday?"), SpecialistId::Ruby);
    assert_eq!(routed("Thanks, see you next week"), SpecialistId::Ruby);
}

#[test]
fn test_advice_detection_is_case_insensitive_substring() {
    let router = router();

    assert!(router.needs_advice("HOW do I start?"));
    // "pain" inside "painting" still counts.
    assert!(router.needs_advice("I was painting all weekend"));
    assert!(!router.needs_advice("Please confirm Thursday"));
}

#[test]
fn test_coordinator_never_wins_an_advice_route() {
    let router = router();

    let chosen = router.route("Help me coordinate appointments and scheduling", true);

    assert!(chosen.can_provide_advice);
    assert_eq!(chosen.id, SpecialistId::Warren);
}
