//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::recommendation::{Preference, Recommendation, Weather};
use super::state::*;
use super::transition::*;
use super::*;
use crate::catalog::Catalog;
use crate::selection::pick_activities;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Test Helpers
// ============================================================================

fn step(
    state: ConversationState,
    slots: &Slots,
    seed: u64,
    text: &str,
) -> Result<TransitionResult, TransitionError> {
    let mut rng = StdRng::seed_from_u64(seed);
    transition(state, slots, &Catalog::seed(), &mut rng, Event::user_input(text))
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Text that cannot contain any keyword: every keyword and catalog key
/// uses at least one of `e`, `i`, `o` or `t`.
fn arb_noise() -> impl Strategy<Value = String> {
    "[abcdfghjklmnpqrsuvwxyz0-9 ]{0,30}"
}

fn arb_destination_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("paris".to_string()),
        Just("tokyo".to_string()),
        Just("new york".to_string()),
        Just("santorini".to_string()),
    ]
}

fn arb_answer() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("city".to_string()),
        Just("country".to_string()),
        Just("cold".to_string()),
        Just("warm".to_string()),
        "[a-z ]{0,12}",
    ]
}

/// A state paired with the slots its only entry path would have filled
fn arb_reachable() -> impl Strategy<Value = (ConversationState, Slots)> {
    prop_oneof![
        Just((ConversationState::Initial, Slots::default())),
        Just((
            ConversationState::ItineraryAwaitingDestination,
            Slots::default()
        )),
        arb_destination_key().prop_map(|key| (
            ConversationState::ItineraryAwaitingDates,
            Slots {
                destination: Some(key),
                ..Slots::default()
            }
        )),
        (arb_destination_key(), "[A-Za-z0-9 -]{1,15}").prop_map(|(key, dates)| (
            ConversationState::ItineraryConfirming,
            Slots {
                destination: Some(key),
                dates: Some(dates),
                ..Slots::default()
            }
        )),
        Just((ConversationState::FlightAwaitingDestination, Slots::default())),
        arb_destination_key().prop_map(|key| (
            ConversationState::FlightAwaitingDates,
            Slots {
                flight_destination: Some(key),
                ..Slots::default()
            }
        )),
        Just((
            ConversationState::DestinationAwaitingCityOrCountry,
            Slots::default()
        )),
        arb_answer().prop_map(|pref| (
            ConversationState::DestinationAwaitingWeather,
            Slots {
                preference: Some(pref),
                ..Slots::default()
            }
        )),
        (arb_answer(), arb_answer()).prop_map(|(pref, weather)| (
            ConversationState::DestinationAwaitingInternational,
            Slots {
                preference: Some(pref),
                weather: Some(weather),
                ..Slots::default()
            }
        )),
    ]
}

/// Inputs a user might send: suggestion values, destinations, and noise
fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("itinerary".to_string()),
        Just("flight".to_string()),
        Just("destination".to_string()),
        Just("yes".to_string()),
        Just("no".to_string()),
        Just("restart".to_string()),
        arb_destination_key(),
        arb_answer(),
        "[A-Za-z0-9 ]{0,20}",
    ]
}

fn arb_preference() -> impl Strategy<Value = Preference> {
    prop_oneof![
        Just(Preference::City),
        Just(Preference::Country),
        Just(Preference::Unknown),
    ]
}

fn arb_weather() -> impl Strategy<Value = Weather> {
    prop_oneof![Just(Weather::Cold), Just(Weather::Warm), Just(Weather::Unknown)]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Random walks from the greeting never hit an invariant violation
    #[test]
    fn prop_walks_never_violate_invariants(
        inputs in proptest::collection::vec(arb_input(), 0..30),
        seed in any::<u64>()
    ) {
        let catalog = Catalog::seed();
        let mut rng = StdRng::seed_from_u64(seed);
        let greeting = transition(
            ConversationState::Initial,
            &Slots::default(),
            &catalog,
            &mut rng,
            Event::Greet,
        );
        prop_assert!(greeting.is_ok());
        let greeting = greeting.unwrap();
        let mut state = greeting.new_state;
        let mut slots = greeting.slots;

        for text in inputs {
            let result = transition(state, &slots, &catalog, &mut rng, Event::user_input(text.clone()));
            prop_assert!(result.is_ok(), "{:?} + {:?} failed: {:?}", state, text, result);
            let result = result.unwrap();
            prop_assert!(!result.replies.is_empty(), "No reply for {:?} in {:?}", text, state);
            state = result.new_state;
            slots = result.slots;
        }
    }

    // Invariant 2: Every reachable state answers every input with at least one reply
    #[test]
    fn prop_every_turn_replies(
        (state, slots) in arb_reachable(),
        text in arb_input(),
        seed in any::<u64>()
    ) {
        let result = step(state, &slots, seed, &text);
        prop_assert!(result.is_ok(), "Transition failed: {:?}", result);
        prop_assert!(!result.unwrap().replies.is_empty());
    }

    // Invariant 3: Unrecognized input in a keyword-matching state stays put and re-offers options
    #[test]
    fn prop_unrecognized_input_reprompts(text in arb_noise()) {
        for state in [
            ConversationState::Initial,
            ConversationState::ItineraryAwaitingDestination,
            ConversationState::FlightAwaitingDestination,
        ] {
            let result = step(state, &Slots::default(), 0, &text).unwrap();
            prop_assert_eq!(result.new_state, state);
            prop_assert!(!result.replies.is_empty());
            prop_assert!(result.replies.iter().all(|r| !r.suggestions.is_empty()));
        }
    }

    // Invariant 4: Restart resets from any state
    #[test]
    fn prop_restart_resets(
        (state, slots) in arb_reachable(),
        prefix in "[a-z ]{0,8}",
        keyword in prop_oneof![Just("restart"), Just("START OVER")]
    ) {
        let result = step(state, &slots, 0, &format!("{prefix}{keyword}")).unwrap();
        prop_assert_eq!(result.new_state, ConversationState::Initial);
        prop_assert!(result.slots.is_empty());
        prop_assert!(result.restarted);
        prop_assert_eq!(result.replies.len(), 1);
        prop_assert_eq!(&result.replies[0].suggestions, &top_level_suggestions());
    }

    // Invariant 5: Returning to the menu always drops collected slots
    #[test]
    fn prop_initial_has_no_slots(
        (state, slots) in arb_reachable(),
        text in arb_input(),
        seed in any::<u64>()
    ) {
        let result = step(state, &slots, seed, &text).unwrap();
        if result.new_state == ConversationState::Initial {
            prop_assert!(result.slots.is_empty(), "Slots leaked: {:?}", result.slots);
        }
    }

    // Invariant 6: Each recommendation follows from the answers that lead to it
    #[test]
    fn prop_recommendation_rules(
        preference in arb_preference(),
        weather in arb_weather(),
        international in any::<bool>()
    ) {
        let picked = Recommendation::select(preference, weather, international);
        let city = preference == Preference::City;
        let country = preference == Preference::Country;

        if international && city && weather == Weather::Warm {
            prop_assert_eq!(picked, Recommendation::Tokyo);
        }
        if international && city && weather == Weather::Cold {
            prop_assert_eq!(picked, Recommendation::Paris);
        }
        if international && country && weather == Weather::Warm {
            prop_assert_eq!(picked, Recommendation::Santorini);
        }
        if !international && city {
            prop_assert_eq!(picked, Recommendation::NewYork);
        }
        if country && weather != Weather::Warm {
            prop_assert_eq!(picked, Recommendation::Fallback);
        }
        if preference == Preference::Unknown {
            prop_assert_eq!(picked, Recommendation::Fallback);
        }
        if picked == Recommendation::Tokyo || picked == Recommendation::Paris {
            prop_assert!(international && city);
        }
    }

    // Invariant 7: Activity picks never repeat and never exceed the list
    #[test]
    fn prop_activity_picks_distinct(
        activities in proptest::collection::hash_set("[a-z]{3,10}", 0..6),
        seed in any::<u64>()
    ) {
        let activities: Vec<String> = activities.into_iter().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let picks = pick_activities(&mut rng, &activities, 2);

        prop_assert_eq!(picks.len(), activities.len().min(2));
        if picks.len() == 2 {
            prop_assert_ne!(&picks[0], &picks[1]);
        }
        prop_assert!(picks.iter().all(|p| activities.contains(p)));
    }

    // Invariant 8: Whitespace never moves the conversation
    #[test]
    fn prop_blank_input_stays_put(
        (state, slots) in arb_reachable(),
        blank in "[ \t]{0,5}",
        seed in any::<u64>()
    ) {
        let result = step(state, &slots, seed, &blank).unwrap();
        prop_assert_eq!(result.new_state, state);
        prop_assert_eq!(&result.slots, &slots);
        prop_assert!(!result.restarted);
        prop_assert_eq!(result.replies.len(), 1);
        prop_assert!(!result.replies[0].suggestions.is_empty());
    }
}
