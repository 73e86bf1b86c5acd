//! Destination recommendation table

use serde::{Deserialize, Serialize};

/// City-or-country answer, read from normalized input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    City,
    Country,
    Unknown,
}

/// Cold-or-warm answer, read from normalized input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Cold,
    Warm,
    Unknown,
}

impl Preference {
    #[must_use]
    pub fn parse(normalized: &str) -> Self {
        if normalized.contains("city") {
            Preference::City
        } else if normalized.contains("country") {
            Preference::Country
        } else {
            Preference::Unknown
        }
    }
}

impl Weather {
    #[must_use]
    pub fn parse(normalized: &str) -> Self {
        if normalized.contains("warm") {
            Weather::Warm
        } else if normalized.contains("cold") {
            Weather::Cold
        } else {
            Weather::Unknown
        }
    }
}

/// Outcome of the recommendation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Tokyo,
    Paris,
    Santorini,
    NewYork,
    /// Nothing more specific matched
    Fallback,
}

impl Recommendation {
    /// First matching rule wins
    #[must_use]
    pub fn select(preference: Preference, weather: Weather, international: bool) -> Self {
        match (preference, weather, international) {
            (Preference::City, Weather::Warm, true) => Recommendation::Tokyo,
            (Preference::City, Weather::Cold, true) => Recommendation::Paris,
            (Preference::Country, Weather::Warm, true) => Recommendation::Santorini,
            (Preference::City, _, false) => Recommendation::NewYork,
            _ => Recommendation::Fallback,
        }
    }

    #[must_use]
    pub fn pitch(self) -> &'static str {
        match self {
            Recommendation::Tokyo => {
                "**Tokyo, Japan** 🗾\n\nPerfect blend of modern city life, warm weather (in summer), and incredible culture!"
            }
            Recommendation::Paris => {
                "**Paris, France** 🗼\n\nRomantic city with beautiful winter charm, world-class museums, and amazing food!"
            }
            Recommendation::Santorini => {
                "**Santorini, Greece** 🏖️\n\nStunning island paradise with beautiful beaches, amazing sunsets, and delicious Mediterranean cuisine!"
            }
            Recommendation::NewYork => {
                "**New York City, USA** 🗽\n\nVibrant city with endless activities, world-famous landmarks, and diverse culture!"
            }
            Recommendation::Fallback => {
                "**Santorini, Greece** 🌅\n\nA perfect destination with beautiful scenery and amazing experiences!"
            }
        }
    }
}
