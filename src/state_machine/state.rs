//! Conversation state types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Conversation State
// ============================================================================

/// Where the conversation is. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationState {
    /// Top-level menu; start state and the state every flow returns to
    #[default]
    Initial,

    /// Itinerary flow: waiting for a catalog destination
    ItineraryAwaitingDestination,

    /// Itinerary flow: destination chosen, waiting for free-text dates
    ItineraryAwaitingDates,

    /// Itinerary flow: summary shown, waiting for yes/no
    ItineraryConfirming,

    /// Flight flow: waiting for a catalog destination
    FlightAwaitingDestination,

    /// Flight flow: destination chosen, waiting for free-text dates
    FlightAwaitingDates,

    /// Recommendation flow: city or country?
    DestinationAwaitingCityOrCountry,

    /// Recommendation flow: cold or warm?
    DestinationAwaitingWeather,

    /// Recommendation flow: leave the country?
    DestinationAwaitingInternational,
}

/// The three top-level conversation purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Itinerary,
    Flight,
    Destination,
}

impl ConversationState {
    /// Flow this state belongs to; `None` for the top-level menu
    #[must_use]
    pub fn flow(self) -> Option<Flow> {
        match self {
            ConversationState::Initial => None,
            ConversationState::ItineraryAwaitingDestination
            | ConversationState::ItineraryAwaitingDates
            | ConversationState::ItineraryConfirming => Some(Flow::Itinerary),
            ConversationState::FlightAwaitingDestination
            | ConversationState::FlightAwaitingDates => Some(Flow::Flight),
            ConversationState::DestinationAwaitingCityOrCountry
            | ConversationState::DestinationAwaitingWeather
            | ConversationState::DestinationAwaitingInternational => Some(Flow::Destination),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::Initial => "initial",
            ConversationState::ItineraryAwaitingDestination => "itinerary_awaiting_destination",
            ConversationState::ItineraryAwaitingDates => "itinerary_awaiting_dates",
            ConversationState::ItineraryConfirming => "itinerary_confirming",
            ConversationState::FlightAwaitingDestination => "flight_awaiting_destination",
            ConversationState::FlightAwaitingDates => "flight_awaiting_dates",
            ConversationState::DestinationAwaitingCityOrCountry => {
                "destination_awaiting_city_or_country"
            }
            ConversationState::DestinationAwaitingWeather => "destination_awaiting_weather",
            ConversationState::DestinationAwaitingInternational => {
                "destination_awaiting_international"
            }
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Slots
// ============================================================================

/// Names of the values a flow collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotName {
    Destination,
    Dates,
    FlightDestination,
    Preference,
    Weather,
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SlotName::Destination => "destination",
            SlotName::Dates => "dates",
            SlotName::FlightDestination => "flightDestination",
            SlotName::Preference => "preference",
            SlotName::Weather => "weather",
        })
    }
}

/// Values collected during the current flow. Unset slots are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slots {
    /// Catalog key of the itinerary destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Free-text travel dates, as typed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    /// Catalog key of the flight destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_destination: Option<String>,
    /// Normalized city/country answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<String>,
    /// Normalized cold/warm answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
}

impl Slots {
    #[must_use]
    pub fn get(&self, name: SlotName) -> Option<&str> {
        match name {
            SlotName::Destination => self.destination.as_deref(),
            SlotName::Dates => self.dates.as_deref(),
            SlotName::FlightDestination => self.flight_destination.as_deref(),
            SlotName::Preference => self.preference.as_deref(),
            SlotName::Weather => self.weather.as_deref(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Slots::default()
    }
}
