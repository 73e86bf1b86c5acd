//! Pure state transition function
//!
//! Given the current state, the collected slots, the catalog and a random
//! source, an event yields the next state, the next slots and at least one
//! reply. Nothing here touches I/O.

use super::recommendation::{Preference, Recommendation, Weather};
use super::{ConversationState, Event, Reply, SlotName, Slots};
use crate::catalog::{Catalog, Destination, Flight};
use crate::selection::pick_itinerary;
use rand::Rng;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub slots: Slots,
    pub replies: Vec<Reply>,
    /// The input asked to start over
    pub restarted: bool,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: ConversationState, slots: Slots) -> Self {
        Self {
            new_state: state,
            slots,
            replies: vec![],
            restarted: false,
        }
    }

    /// Back to the top-level menu with nothing collected
    #[must_use]
    pub fn finished() -> Self {
        Self::new(ConversationState::Initial, Slots::default())
    }

    #[must_use]
    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.replies.push(reply);
        self
    }

    #[must_use]
    pub fn mark_restart(mut self) -> Self {
        self.restarted = true;
        self
    }
}

/// Internal invariant violations.
///
/// None of these are reachable through the transition graph; they mean a
/// state was entered without the path that fills its slots.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Slot {slot} is unset in state {state}")]
    MissingSlot {
        slot: SlotName,
        state: ConversationState,
    },
    #[error("Slot refers to unknown destination {0:?}")]
    UnknownDestination(String),
    #[error("Destination {0:?} has no hotels")]
    NoHotels(String),
}

/// Committed input: raw text for storage and echo, normalized for matching
struct Input {
    raw: String,
    normalized: String,
}

impl Input {
    fn new(raw: String) -> Self {
        let normalized = raw.trim().to_lowercase();
        Self { raw, normalized }
    }

    fn contains(&self, keyword: &str) -> bool {
        self.normalized.contains(keyword)
    }

    fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }

    fn wants_restart(&self) -> bool {
        self.contains("restart") || self.contains("start over")
    }
}

/// Pure transition function
///
/// # Errors
///
/// Returns a [`TransitionError`] when `state` needs a slot that `slots`
/// does not hold, or a slot names a destination missing from `catalog`.
/// Neither happens for states reached through this function.
pub fn transition<R: Rng + ?Sized>(
    state: ConversationState,
    slots: &Slots,
    catalog: &Catalog,
    rng: &mut R,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    let input = match event {
        Event::Greet => return Ok(TransitionResult::finished().with_reply(Reply::greeting())),
        Event::UserInput { text } => Input::new(text),
    };

    // Blank input never advances a flow
    if input.is_blank() {
        return Ok(TransitionResult::new(state, slots.clone()).with_reply(reprompt(state, catalog)));
    }

    // Restart works from every state, ahead of per-state keywords
    if input.wants_restart() {
        let result = match state {
            // "No, start over" is the decline answer here
            ConversationState::ItineraryConfirming => decline_itinerary(),
            _ => TransitionResult::finished().with_reply(Reply::fresh_start()),
        };
        return Ok(result.mark_restart());
    }

    match state {
        ConversationState::Initial => Ok(initial(&input, catalog)),
        ConversationState::ItineraryAwaitingDestination => {
            Ok(itinerary_destination(slots, catalog, &input))
        }
        ConversationState::ItineraryAwaitingDates => itinerary_dates(slots, catalog, rng, input),
        ConversationState::ItineraryConfirming => itinerary_confirm(slots, catalog, &input),
        ConversationState::FlightAwaitingDestination => {
            Ok(flight_destination(slots, catalog, &input))
        }
        ConversationState::FlightAwaitingDates => flight_dates(slots, catalog, &input),
        ConversationState::DestinationAwaitingCityOrCountry => Ok(city_or_country(slots, input)),
        ConversationState::DestinationAwaitingWeather => Ok(weather(slots, input)),
        ConversationState::DestinationAwaitingInternational => international(slots, &input),
    }
}

const DID_NOT_UNDERSTAND: &str = "I didn't quite understand that. How can I help you?";

const ITINERARY_DATES_PROMPT: &str = "When would you like to go and for how long?\n\n\
     (Example: \"January 15-20\" or \"Next week for 5 days\")";

const FLIGHT_DATES_PROMPT: &str = "What dates are you looking to travel?\n\n\
     (Example: \"December 20\" or \"Next Friday\")";

const CONFIRM_PROMPT: &str = "Would you like to move forward and create a full itinerary?";

const CITY_OR_COUNTRY_PROMPT: &str = "Do you prefer city or country settings?";

/// The current question again, for input that cannot answer it
fn reprompt(state: ConversationState, catalog: &Catalog) -> Reply {
    match state {
        ConversationState::Initial => Reply::top_level(DID_NOT_UNDERSTAND),
        ConversationState::ItineraryAwaitingDestination
        | ConversationState::FlightAwaitingDestination => choose_destination(catalog),
        ConversationState::ItineraryAwaitingDates => dates_reprompt(ITINERARY_DATES_PROMPT),
        ConversationState::FlightAwaitingDates => dates_reprompt(FLIGHT_DATES_PROMPT),
        ConversationState::ItineraryConfirming => confirm_question(CONFIRM_PROMPT),
        ConversationState::DestinationAwaitingCityOrCountry => {
            city_or_country_question(CITY_OR_COUNTRY_PROMPT)
        }
        ConversationState::DestinationAwaitingWeather => weather_question(),
        ConversationState::DestinationAwaitingInternational => international_question(),
    }
}

// ============================================================
// Top-level menu
// ============================================================

fn initial(input: &Input, catalog: &Catalog) -> TransitionResult {
    if input.contains("itinerary") {
        TransitionResult::new(
            ConversationState::ItineraryAwaitingDestination,
            Slots::default(),
        )
        .with_reply(Reply::pick_destination(
            "Great! I'd love to help you plan an itinerary. 🗺️\n\nWhere would you like to go?",
            catalog,
        ))
    } else if input.contains("flight") {
        TransitionResult::new(
            ConversationState::FlightAwaitingDestination,
            Slots::default(),
        )
        .with_reply(Reply::pick_destination(
            "I'll help you find a flight! ✈️\n\nWhat's your destination?",
            catalog,
        ))
    } else if input.contains("destination") || input.contains("pick") {
        TransitionResult::new(
            ConversationState::DestinationAwaitingCityOrCountry,
            Slots::default(),
        )
        .with_reply(city_or_country_question(&format!(
            "Let me help you find the perfect destination! 🌍\n\n{CITY_OR_COUNTRY_PROMPT}"
        )))
    } else {
        TransitionResult::finished().with_reply(Reply::top_level(DID_NOT_UNDERSTAND))
    }
}

// ============================================================
// Itinerary flow
// ============================================================

fn itinerary_destination(slots: &Slots, catalog: &Catalog, input: &Input) -> TransitionResult {
    match catalog.match_destination(&input.normalized) {
        Some(dest) => TransitionResult::new(
            ConversationState::ItineraryAwaitingDates,
            Slots {
                destination: Some(dest.key.clone()),
                ..slots.clone()
            },
        )
        .with_reply(Reply::new(format!(
            "Perfect choice! {} is amazing! 🎉\n\n{ITINERARY_DATES_PROMPT}",
            dest.name
        ))),
        None => TransitionResult::new(ConversationState::ItineraryAwaitingDestination, slots.clone())
            .with_reply(choose_destination(catalog)),
    }
}

fn itinerary_dates<R: Rng + ?Sized>(
    slots: &Slots,
    catalog: &Catalog,
    rng: &mut R,
    input: Input,
) -> Result<TransitionResult, TransitionError> {
    let state = ConversationState::ItineraryAwaitingDates;
    let dest = slot_destination(catalog, slots, SlotName::Destination, state)?;
    let picks = pick_itinerary(rng, dest);
    let hotel = picks
        .hotel
        .ok_or_else(|| TransitionError::NoHotels(dest.key.clone()))?;

    let mut summary = format!(
        "Here's a quick itinerary for **{}**! ✨\n\n📅 **Dates:** {}\n\n🏨 **Hotel:** {}",
        dest.name, input.raw, hotel
    );
    if !picks.activities.is_empty() {
        summary.push_str("\n\n🎯 **Activities:**");
        for activity in &picks.activities {
            summary.push_str("\n• ");
            summary.push_str(activity);
        }
    }
    summary.push_str("\n\n");
    summary.push_str(CONFIRM_PROMPT);

    Ok(TransitionResult::new(
        ConversationState::ItineraryConfirming,
        Slots {
            dates: Some(input.raw),
            ..slots.clone()
        },
    )
    .with_reply(confirm_question(&summary)))
}

fn itinerary_confirm(
    slots: &Slots,
    catalog: &Catalog,
    input: &Input,
) -> Result<TransitionResult, TransitionError> {
    if !input.contains("yes") {
        return Ok(decline_itinerary());
    }

    let state = ConversationState::ItineraryConfirming;
    let dest = slot_destination(catalog, slots, SlotName::Destination, state)?;
    Ok(TransitionResult::finished().with_reply(
        Reply::new(format!(
            "Excellent! 🎊 Your full itinerary for {} is being created.\n\n\
             You can view and customize it in the Itinerary section. \
             Would you like help with anything else?",
            dest.name
        ))
        .with_suggestion("Find a flight", "flight")
        .with_suggestion("Start over", "restart"),
    ))
}

fn decline_itinerary() -> TransitionResult {
    TransitionResult::finished().with_reply(Reply::top_level("No problem! How else can I help you?"))
}

// ============================================================
// Flight flow
// ============================================================

fn flight_destination(slots: &Slots, catalog: &Catalog, input: &Input) -> TransitionResult {
    match catalog.match_destination(&input.normalized) {
        Some(dest) => TransitionResult::new(
            ConversationState::FlightAwaitingDates,
            Slots {
                flight_destination: Some(dest.key.clone()),
                ..slots.clone()
            },
        )
        .with_reply(Reply::new(format!(
            "Great! Searching for flights to {}. ✈️\n\n{FLIGHT_DATES_PROMPT}",
            dest.name
        ))),
        None => TransitionResult::new(ConversationState::FlightAwaitingDestination, slots.clone())
            .with_reply(choose_destination(catalog)),
    }
}

fn flight_dates(
    slots: &Slots,
    catalog: &Catalog,
    input: &Input,
) -> Result<TransitionResult, TransitionError> {
    let state = ConversationState::FlightAwaitingDates;
    let dest = slot_destination(catalog, slots, SlotName::FlightDestination, state)?;
    let flights = catalog.flights(&dest.key);

    let text = if flights.is_empty() {
        format!(
            "Sorry, I couldn't find any flights to {} around {}. \
             Would you like help with anything else?",
            dest.name, input.raw
        )
    } else {
        format!(
            "Here are the nearest flights to {} around {}: ✈️{}\n\n\
             Would you like help with anything else?",
            dest.name,
            input.raw,
            format_flights(flights)
        )
    };

    Ok(TransitionResult::finished().with_reply(
        Reply::new(text)
            .with_suggestion("Build an itinerary", "itinerary")
            .with_suggestion("Pick a destination", "destination")
            .with_suggestion("Start over", "restart"),
    ))
}

fn format_flights(flights: &[Flight]) -> String {
    flights
        .iter()
        .enumerate()
        .map(|(i, f)| {
            format!(
                "\n{}. **{} {}**\n   Departs: {} → Arrives: {}\n   Price: {}",
                i + 1,
                f.airline,
                f.flight_number,
                f.departure,
                f.arrival,
                f.price
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================
// Recommendation flow
// ============================================================

fn city_or_country(slots: &Slots, input: Input) -> TransitionResult {
    TransitionResult::new(
        ConversationState::DestinationAwaitingWeather,
        Slots {
            preference: Some(input.normalized),
            ..slots.clone()
        },
    )
    .with_reply(weather_question())
}

fn weather(slots: &Slots, input: Input) -> TransitionResult {
    TransitionResult::new(
        ConversationState::DestinationAwaitingInternational,
        Slots {
            weather: Some(input.normalized),
            ..slots.clone()
        },
    )
    .with_reply(international_question())
}

fn international(slots: &Slots, input: &Input) -> Result<TransitionResult, TransitionError> {
    let state = ConversationState::DestinationAwaitingInternational;
    let preference = require(slots, SlotName::Preference, state)?;
    let weather = require(slots, SlotName::Weather, state)?;
    let recommendation = Recommendation::select(
        Preference::parse(preference),
        Weather::parse(weather),
        input.contains("yes"),
    );

    Ok(TransitionResult::finished().with_reply(
        Reply::new(format!(
            "Based on your preferences, I recommend:\n\n{}\n\n\
             Would you like help planning this trip?",
            recommendation.pitch()
        ))
        .with_suggestion("Build me an itinerary", "itinerary")
        .with_suggestion("Find flights", "flight")
        .with_suggestion("Start over", "restart"),
    ))
}

// ============================================================
// Shared prompts and slot access
// ============================================================

fn choose_destination(catalog: &Catalog) -> Reply {
    Reply::pick_destination("Please choose one of these destinations:", catalog)
}

fn dates_reprompt(prompt: &str) -> Reply {
    Reply::new(prompt).with_suggestion("Start over", "restart")
}

fn confirm_question(text: &str) -> Reply {
    Reply::new(text)
        .with_suggestion("Yes, create full itinerary", "yes")
        .with_suggestion("No, start over", "no")
}

fn city_or_country_question(text: &str) -> Reply {
    Reply::new(text)
        .with_suggestion("City", "city")
        .with_suggestion("Country", "country")
}

fn weather_question() -> Reply {
    Reply::new("Do you prefer cold or warm places? ❄️☀️")
        .with_suggestion("Cold", "cold")
        .with_suggestion("Warm", "warm")
}

fn international_question() -> Reply {
    Reply::new("Would you like to go out of the country? 🌍")
        .with_suggestion("Yes", "yes")
        .with_suggestion("No", "no")
}

fn require(
    slots: &Slots,
    slot: SlotName,
    state: ConversationState,
) -> Result<&str, TransitionError> {
    slots
        .get(slot)
        .ok_or(TransitionError::MissingSlot { slot, state })
}

fn slot_destination<'c>(
    catalog: &'c Catalog,
    slots: &Slots,
    slot: SlotName,
    state: ConversationState,
) -> Result<&'c Destination, TransitionError> {
    let key = require(slots, slot, state)?;
    catalog
        .destination(key)
        .ok_or_else(|| TransitionError::UnknownDestination(key.to_string()))
}
